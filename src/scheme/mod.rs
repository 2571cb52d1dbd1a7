//! Scheme synthesis: a seed color, a mode and a variant to named role colors.

pub mod palette;
pub mod roles;
pub mod variant;

use std::collections::HashMap;

use log::debug;

use crate::color::Color;
use crate::hct::Hct;

pub use palette::{CorePalettes, TonalPalette};
pub use roles::{PaletteKind, Role, RoleColorMap, ToneRule};
pub use variant::Variant;

/// Minimum tone distance between a foreground role and its background.
///
/// Stands in for Material's contrast-ratio curves: at contrast 0 every
/// `on*` role sits at least this far from the role it is drawn on.
pub const MIN_TONE_DELTA: f64 = 40.0;
/// Every foreground sits at least this much past [`MIN_TONE_DELTA`], so the
/// solved color still clears it after 8-bit quantization and softening.
const TONE_MARGIN: f64 = 2.0;
/// How far a full contrast level widens every foreground/background gap.
const CONTRAST_TONE_RANGE: f64 = 20.0;

pub const SOFTEN_CHROMA: f64 = 0.60;

/// Success colors are not seed-derived: (name, dark, light).
const SUCCESS_ROLES: [(&str, Color, Color); 4] = [
    (
        "success",
        Color::new(0xB5, 0xCC, 0xBA),
        Color::new(0x4F, 0x63, 0x54),
    ),
    (
        "onSuccess",
        Color::new(0x21, 0x35, 0x28),
        Color::new(0xFF, 0xFF, 0xFF),
    ),
    (
        "successContainer",
        Color::new(0x37, 0x4B, 0x3E),
        Color::new(0xD1, 0xE8, 0xD5),
    ),
    (
        "onSuccessContainer",
        Color::new(0xD1, 0xE9, 0xD6),
        Color::new(0x0C, 0x1F, 0x13),
    ),
];

/// A seed resolved into palettes for one mode, variant and contrast level.
#[derive(Debug, Clone)]
pub struct Scheme {
    pub seed: Hct,
    pub variant: Variant,
    pub dark: bool,
    pub contrast: f64,
    pub palettes: CorePalettes,
}

impl Scheme {
    pub fn new(seed: Hct, variant: Variant, dark: bool, contrast: f64) -> Self {
        Self {
            seed,
            variant,
            dark,
            contrast: contrast.clamp(-1.0, 1.0),
            palettes: CorePalettes::new(seed, variant),
        }
    }

    fn palette(&self, kind: PaletteKind) -> TonalPalette {
        match kind {
            PaletteKind::Primary => self.palettes.primary,
            PaletteKind::Secondary => self.palettes.secondary,
            PaletteKind::Tertiary => self.palettes.tertiary,
            PaletteKind::Neutral => self.palettes.neutral,
            PaletteKind::NeutralVariant => self.palettes.neutral_variant,
            PaletteKind::Error => self.palettes.error,
        }
    }

    fn tone_rule(&self, role: Role) -> ToneRule {
        let monochrome = if self.variant == Variant::Monochrome {
            role.monochrome_tone_rule()
        } else {
            None
        };
        monochrome.unwrap_or_else(|| role.tone_rule())
    }

    /// Tone a role asks for before any contrast correction.
    fn base_tone(&self, role: Role) -> Option<f64> {
        let content_like = matches!(self.variant, Variant::Fidelity | Variant::Content);
        if content_like && role == Role::PrimaryContainer {
            return Some(self.seed.tone());
        }
        self.tone_rule(role).resolve(self.dark)
    }

    fn resolve(&self, role: Role, cache: &mut HashMap<Role, Hct>) -> Hct {
        if let Some(hct) = cache.get(&role) {
            return *hct;
        }
        let palette = self.palette(role.palette());
        let hct = match self.base_tone(role) {
            None => palette.key_color(),
            Some(tone) => {
                let tone = match role.background() {
                    Some(background) => {
                        let background_tone = self.resolve(background, cache).tone();
                        foreground_tone(tone, background_tone, self.contrast)
                    }
                    None => tone,
                };
                palette.tone(tone)
            }
        };
        cache.insert(role, hct);
        hct
    }

    /// The color of one role, before softening.
    pub fn role_hct(&self, role: Role) -> Hct {
        self.resolve(role, &mut HashMap::new())
    }

    /// Every role, in declaration order.
    pub fn role_hcts(&self) -> Vec<(Role, Hct)> {
        let mut cache = HashMap::new();
        Role::ALL
            .iter()
            .map(|&role| (role, self.resolve(role, &mut cache)))
            .collect()
    }
}

/// Keep `tone` at least [`MIN_TONE_DELTA`] away from `background`, widened or
/// narrowed by the contrast level. Prefers the side `tone` is already on and
/// falls back to the other side, then to the farthest extreme.
pub fn foreground_tone(tone: f64, background: f64, contrast: f64) -> f64 {
    let gap = (tone - background).abs();
    let desired = (gap + contrast * CONTRAST_TONE_RANGE).max(MIN_TONE_DELTA + TONE_MARGIN);
    if (desired - gap).abs() < f64::EPSILON {
        return tone;
    }

    let upward = if (tone - background).abs() < f64::EPSILON {
        background < 50.0
    } else {
        tone > background
    };
    let (first, second) = if upward {
        (background + desired, background - desired)
    } else {
        (background - desired, background + desired)
    };
    let in_range = |t: f64| (0.0..=100.0).contains(&t);
    if in_range(first) {
        first
    } else if in_range(second) {
        second
    } else if background < 50.0 {
        100.0
    } else {
        0.0
    }
}

/// Synthesize the full role map for a seed.
pub fn synthesize(
    seed: Hct,
    variant: Variant,
    dark: bool,
    contrast: f64,
    soften: bool,
) -> RoleColorMap {
    let scheme = Scheme::new(seed, variant, dark, contrast);
    let soften = soften && !variant.is_low_chroma();
    debug!(
        "synthesizing {variant} ({} mode, contrast {}, soften {soften})",
        if dark { "dark" } else { "light" },
        scheme.contrast
    );

    let mut map = RoleColorMap::new();
    for (role, hct) in scheme.role_hcts() {
        let hct = if soften {
            Hct::from_hct(hct.hue(), hct.chroma() * SOFTEN_CHROMA, hct.tone())
        } else {
            hct
        };
        map.push(role.name(), Color::from_hct(hct));
    }
    for (name, dark_color, light_color) in SUCCESS_ROLES {
        map.push(name, if dark { dark_color } else { light_color });
    }
    map
}
