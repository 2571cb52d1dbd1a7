//! Readability pass over a harmonized terminal palette.
//!
//! Harmonization tends to bunch slots together: similar hue, muted chroma,
//! tones close to the background. This pass pushes each slot back out, in
//! order: a chroma floor, a minimum tone distance from `term0`, and a partial
//! hue pull-back for slots that collapsed onto the anchor hue.

use log::debug;

use crate::color::Color;
use crate::hct::{hue_distance, rotation_direction, sanitize_degrees, Hct};

use super::{TerminalPalette, SLOT_NAMES};

/// Slots that must carry visible color.
const CHROMA_SLOTS: [usize; 12] = [1, 2, 3, 4, 5, 6, 9, 10, 11, 12, 13, 14];
/// Red/yellow/magenta slots get a higher floor.
const WARM_SLOTS: [usize; 6] = [1, 3, 5, 9, 11, 13];

const DARK_CHROMA_FLOOR: f64 = 34.0;
const LIGHT_CHROMA_FLOOR: f64 = 28.0;
const WARM_CHROMA_BONUS: f64 = 4.0;

const BRIGHT_BLACK_TONE_DELTA: f64 = 12.0;
const BRIGHT_TONE_DELTA: f64 = 30.0;
const NORMAL_TONE_DELTA: f64 = 22.0;

/// Slots closer than this to the anchor hue get pulled back.
const HUE_COLLAPSE: f64 = 10.0;
const HUE_RESTORE: f64 = 0.35;
/// Pull-backs below this many degrees are skipped.
const MIN_HUE_SHIFT: f64 = 0.5;
/// Slack for 8-bit rounding when deciding a slot was already pulled back.
const HUE_TOLERANCE: f64 = 1.0;
/// Below this chroma a hue is rounding noise and is left alone.
const HUE_MIN_CHROMA: f64 = 10.0;

/// A chroma lift that stays under the floor must gain at least this much.
const MIN_CHROMA_GAIN: f64 = 1.0;
/// Extra chroma requested over a floor, tried in order until the 8-bit
/// result reaches it.
const CHROMA_MARGINS: [f64; 3] = [1.0, 2.0, 4.0];
/// Tone overshoot past the delta target, tried in order until the 8-bit
/// result clears it.
const TONE_MARGINS: [f64; 3] = [0.5, 1.0, 2.0];
/// Re-applications of the slot rules needed to absorb rounding.
const MAX_SETTLE: usize = 4;

pub fn chroma_floor(index: usize, dark: bool) -> Option<f64> {
    if !CHROMA_SLOTS.contains(&index) {
        return None;
    }
    let base = if dark {
        DARK_CHROMA_FLOOR
    } else {
        LIGHT_CHROMA_FLOOR
    };
    let bonus = if WARM_SLOTS.contains(&index) {
        WARM_CHROMA_BONUS
    } else {
        0.0
    };
    Some(base + bonus)
}

/// Required tone distance between a slot and the background. `term0` is the
/// background itself and has none.
pub fn tone_delta(index: usize) -> Option<f64> {
    match index {
        0 => None,
        8 => Some(BRIGHT_BLACK_TONE_DELTA),
        9..=15 => Some(BRIGHT_TONE_DELTA),
        _ => Some(NORMAL_TONE_DELTA),
    }
}

/// Step B: enforce chroma floor, background tone delta and hue diversity.
///
/// `source` supplies the pre-harmonization hue for the pull-back. `term0` and
/// slots that fail to parse are left as they are. Each slot is re-run until
/// its 8-bit value stops changing, so running the pass on its own output is a
/// no-op.
pub fn enforce_spread(
    palette: &TerminalPalette,
    source: &TerminalPalette,
    dark: bool,
    anchor: Hct,
) -> TerminalPalette {
    let background = palette.color(0).or_else(|| source.color(0));
    let Some(background) = background else {
        debug!("no parseable background slot, skipping spread pass");
        return palette.clone();
    };
    let background_tone = background.to_hct().tone();

    TerminalPalette::from_fn(|index| {
        let (true, Some(color), Some(original)) = (
            index != 0,
            palette.color(index),
            source.color(index).or_else(|| palette.color(index)),
        ) else {
            return palette.get(index).to_string();
        };
        let rules = SlotRules {
            floor: chroma_floor(index, dark),
            tone_target: tone_delta(index).map(|delta| tone_target(background_tone, delta, dark)),
            dark,
            source_hue: original.to_hct().hue(),
            anchor_hue: anchor.hue(),
        };

        let mut spread = color;
        for _ in 0..MAX_SETTLE {
            let next = Color::from_hct(rules.apply(spread.to_hct()));
            if next == spread {
                break;
            }
            spread = next;
        }
        if spread != color {
            debug!("{}: {} -> {}", SLOT_NAMES[index], color, spread);
        }
        spread.to_hex_upper()
    })
}

/// Tone a slot has to reach, clamped into the tone range.
fn tone_target(background_tone: f64, delta: f64, dark: bool) -> f64 {
    if dark {
        (background_tone + delta).clamp(0.0, 100.0)
    } else {
        (background_tone - delta).clamp(0.0, 100.0)
    }
}

/// The Step B rules for one slot.
struct SlotRules {
    floor: Option<f64>,
    tone_target: Option<f64>,
    dark: bool,
    source_hue: f64,
    anchor_hue: f64,
}

impl SlotRules {
    /// Floor, then tone, then hue. A rule that is already met leaves the
    /// color untouched.
    fn apply(&self, mut hct: Hct) -> Hct {
        if let Some(floor) = self.floor {
            if hct.chroma() < floor {
                let lifted = self.solve(hct.hue(), hct.chroma(), hct.tone());
                if lifted.chroma() >= floor || lifted.chroma() > hct.chroma() + MIN_CHROMA_GAIN {
                    hct = lifted;
                }
            }
        }

        if let Some(target) = self.tone_target {
            if !self.clears(hct.tone(), target) {
                hct = self.move_tone(hct, target);
            }
        }

        if let Some(hue) = self.restored_hue(hct) {
            hct = self.solve(hue, hct.chroma(), hct.tone());
        }

        hct
    }

    fn clears(&self, tone: f64, target: f64) -> bool {
        if self.dark {
            tone >= target
        } else {
            tone <= target
        }
    }

    /// Re-solve at `hue`/`tone`. With a floor, asks for a little more chroma
    /// until the 8-bit result holds the floor, or keeps the most chroma the
    /// gamut gives.
    fn solve(&self, hue: f64, chroma: f64, tone: f64) -> Hct {
        let Some(floor) = self.floor else {
            return Hct::from_hct(hue, chroma, tone);
        };
        let wanted = chroma.max(floor);
        let mut best: Option<Hct> = None;
        for margin in CHROMA_MARGINS {
            let candidate = Hct::from_hct(hue, wanted + margin, tone);
            if candidate.chroma() >= wanted {
                return candidate;
            }
            if best.map_or(true, |b| candidate.chroma() > b.chroma()) {
                best = Some(candidate);
            }
        }
        best.unwrap_or_else(|| Hct::from_hct(hue, wanted, tone))
    }

    /// Move to the tone target with a small overshoot, keeping the floor: a
    /// floor the old tone could not hold may fit at the new one.
    fn move_tone(&self, hct: Hct, target: f64) -> Hct {
        let mut moved = hct;
        for margin in TONE_MARGINS {
            let tone = if self.dark {
                (target + margin).min(100.0)
            } else {
                (target - margin).max(0.0)
            };
            moved = self.solve(hct.hue(), hct.chroma(), tone);
            if self.clears(moved.tone(), target) {
                break;
            }
        }
        moved
    }

    /// The pulled-back hue for a slot that collapsed onto the anchor.
    ///
    /// A pull-back moves 35% of the way to the source hue and never ends
    /// closer to the anchor than 65% of the anchor-to-source arc. Slots
    /// already at or past that point count as restored.
    fn restored_hue(&self, hct: Hct) -> Option<f64> {
        if hct.chroma() < HUE_MIN_CHROMA
            || hue_distance(hct.hue(), self.anchor_hue) >= HUE_COLLAPSE
        {
            return None;
        }
        let to_source = hue_distance(hct.hue(), self.source_hue);
        let arc = hue_distance(self.anchor_hue, self.source_hue);
        let settled = (1.0 - HUE_RESTORE) * to_source.min(arc);
        if to_source <= (1.0 - HUE_RESTORE) * arc + HUE_TOLERANCE {
            return None;
        }
        let back = to_source - settled;
        if back < MIN_HUE_SHIFT {
            return None;
        }
        Some(sanitize_degrees(
            hct.hue() + back * rotation_direction(hct.hue(), self.source_hue),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK_BG: &str = "#141318";
    const LIGHT_BG: &str = "#FDF8FD";

    fn palette(background: &str, slots: [&str; 15]) -> TerminalPalette {
        TerminalPalette::from_fn(|i| {
            if i == 0 {
                background.to_string()
            } else {
                slots[i - 1].to_string()
            }
        })
    }

    /// Slots spread around the wheel, away from an orange anchor.
    fn muted(background: &str) -> TerminalPalette {
        palette(
            background,
            [
                "#6B5050", "#55604F", "#66614A", "#4E5567", "#61536A", "#4D6164", "#C8C8C8",
                "#303030", "#7D6A6A", "#6B7A69", "#7F7B66", "#6A7080", "#7F6F87", "#6C7D80",
                "#E0E0E0",
            ],
        )
    }

    fn anchor() -> Hct {
        Hct::from_hct(60.0, 40.0, 50.0)
    }

    fn assert_compliant(out: &TerminalPalette, dark: bool) {
        let background = out.color(0).unwrap().to_hct().tone();
        for index in 1..16 {
            let hct = out.color(index).unwrap().to_hct();
            if let Some(floor) = chroma_floor(index, dark) {
                let reachable = Hct::from_hct(hct.hue(), floor + 4.0, hct.tone()).chroma();
                assert!(
                    hct.chroma() >= floor || reachable < floor,
                    "term{index}: chroma {} below floor {floor}, gamut reaches {reachable}",
                    hct.chroma()
                );
            }
            let delta = tone_delta(index).unwrap();
            let gap = if dark {
                hct.tone() - background
            } else {
                background - hct.tone()
            };
            assert!(gap >= delta, "term{index}: tone gap {gap} < {delta}");
        }
    }

    #[test]
    fn floors_and_deltas() {
        assert_eq!(chroma_floor(1, true), Some(38.0));
        assert_eq!(chroma_floor(2, true), Some(34.0));
        assert_eq!(chroma_floor(2, false), Some(28.0));
        assert_eq!(chroma_floor(13, false), Some(32.0));
        assert_eq!(chroma_floor(0, true), None);
        assert_eq!(chroma_floor(7, true), None);
        assert_eq!(chroma_floor(15, true), None);

        assert_eq!(tone_delta(0), None);
        assert_eq!(tone_delta(8), Some(12.0));
        assert_eq!(tone_delta(15), Some(30.0));
        assert_eq!(tone_delta(7), Some(22.0));
    }

    #[test]
    fn dark_palette_is_lifted_and_saturated() {
        let input = muted(DARK_BG);
        let out = enforce_spread(&input, &input, true, anchor());
        assert_eq!(out.get(0), DARK_BG);
        assert_compliant(&out, true);
    }

    #[test]
    fn light_palette_is_darkened() {
        let input = palette(
            LIGHT_BG,
            [
                "#E0B0B0", "#B8D8B0", "#E0D8A0", "#B0C0E0", "#D8B8E0", "#B0D8D8", "#E8E8E8",
                "#F0F0F0", "#E8C8C8", "#C8E0C0", "#E8E0B8", "#C0D0E8", "#E0C8E8", "#C0E0E0",
                "#F8F8F8",
            ],
        );
        let out = enforce_spread(&input, &input, false, anchor());
        assert_eq!(out.get(0), LIGHT_BG);
        assert_compliant(&out, false);
    }

    #[test]
    fn spread_is_a_fixpoint_on_compliant_output() {
        for (dark, background) in [(true, DARK_BG), (false, LIGHT_BG)] {
            let input = muted(background);
            let once = enforce_spread(&input, &input, dark, anchor());
            let twice = enforce_spread(&once, &input, dark, anchor());
            assert_eq!(once, twice, "dark={dark}");
        }
    }

    #[test]
    fn collapsed_hue_is_pulled_back_toward_source() {
        let anchor = Hct::from_hct(260.0, 40.0, 60.0);
        let collapsed = Hct::from_hct(256.0, 40.0, 60.0);
        let original = Hct::from_hct(200.0, 40.0, 60.0);

        let harmonized = palette(DARK_BG, [Color::from_hct(collapsed).to_hex_upper().as_str(); 15]);
        let source = palette(DARK_BG, [Color::from_hct(original).to_hex_upper().as_str(); 15]);
        let out = enforce_spread(&harmonized, &source, true, anchor);

        let hue = out.color(2).unwrap().to_hct().hue();
        let expected = collapsed.hue() - hue_distance(collapsed.hue(), original.hue()) * HUE_RESTORE;
        assert!(
            hue_distance(hue, expected) < 3.0,
            "expected ~{expected}, got {hue}"
        );
    }

    #[test]
    fn pulled_back_hue_is_not_pulled_again() {
        let anchor = Hct::from_hct(260.0, 40.0, 60.0);
        let collapsed = Hct::from_hct(258.0, 40.0, 60.0);
        let original = Hct::from_hct(240.0, 40.0, 60.0);

        let harmonized = palette(DARK_BG, [Color::from_hct(collapsed).to_hex_upper().as_str(); 15]);
        let source = palette(DARK_BG, [Color::from_hct(original).to_hex_upper().as_str(); 15]);
        let once = enforce_spread(&harmonized, &source, true, anchor);
        let twice = enforce_spread(&once, &source, true, anchor);
        assert_eq!(once, twice);

        let hue = once.color(2).unwrap().to_hct().hue();
        assert!(hue_distance(hue, anchor.hue()) < HUE_COLLAPSE, "{hue}");
        assert!(hue_distance(hue, original.hue()) < hue_distance(collapsed.hue(), original.hue()));
    }

    #[test]
    fn background_never_moves() {
        let anchor = Hct::from_hct(260.0, 40.0, 60.0);
        let background = Color::from_hct(Hct::from_hct(262.0, 30.0, 10.0)).to_hex_upper();
        let source_bg = Color::from_hct(Hct::from_hct(180.0, 30.0, 10.0)).to_hex_upper();
        let harmonized = palette(&background, ["#6B5050"; 15]);
        let source = palette(&source_bg, ["#6B5050"; 15]);
        let out = enforce_spread(&harmonized, &source, true, anchor);
        assert_eq!(out.get(0), background);
    }

    #[test]
    fn reachable_floor_is_met_after_rounding() {
        // Low-chroma slots at mid tone, where every hue can hold the floor.
        let input = palette(
            DARK_BG,
            [
                "#8A7A7A", "#7A8A7A", "#8A8A7A", "#7A7A8A", "#8A7A8A", "#7A8A8A", "#C8C8C8",
                "#505050", "#9A8A8A", "#8A9A8A", "#9A9A8A", "#8A8A9A", "#9A8A9A", "#8A9A9A",
                "#E0E0E0",
            ],
        );
        let out = enforce_spread(&input, &input, true, anchor());
        assert_compliant(&out, true);
        for index in [1, 4, 5, 9, 12, 13] {
            let chroma = out.color(index).unwrap().to_hct().chroma();
            let floor = chroma_floor(index, true).unwrap();
            assert!(chroma >= floor, "term{index}: {chroma} < {floor}");
        }
    }

    #[test]
    fn generated_palettes_are_fixpoints() {
        use crate::scheme::{synthesize, Variant};
        use crate::terminal::{anchor_of, build, HarmonizeOptions};

        let seeds = [0xffd3dc16, 0xffa70427, 0xff7aa2f7, 0xff3366cc, 0xff2e8b57, 0xffc0392b];
        for argb in seeds {
            for dark in [true, false] {
                for variant in [Variant::Vibrant, Variant::TonalSpot, Variant::Expressive] {
                    let roles = synthesize(Hct::from_argb(argb), variant, dark, 0.0, false);
                    let colors = build(&roles, None, variant, dark, &HarmonizeOptions::default());
                    let again = enforce_spread(&colors.harmonized, &colors.source, dark, anchor_of(&roles));
                    assert_eq!(again, colors.harmonized, "{argb:08x} {variant} dark={dark}");
                    assert_compliant(&colors.harmonized, dark);
                }
            }
        }
    }

    #[test]
    fn malformed_slot_passes_through() {
        let mut slots = ["#6B5050"; 15];
        slots[4] = "nope";
        let input = palette(DARK_BG, slots);
        let out = enforce_spread(&input, &input, true, anchor());
        assert_eq!(out.get(5), "nope");
    }

    #[test]
    fn missing_background_skips_pass() {
        let input = palette("??", ["#6B5050"; 15]);
        let out = enforce_spread(&input, &input, true, anchor());
        assert_eq!(out, input);
    }
}
