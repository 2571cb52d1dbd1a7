use log::warn;

use crate::color::Color;
use crate::error::SlotError;
use crate::hct::{hue_distance, rotation_direction, sanitize_degrees, Hct};
use crate::scheme::{Role, RoleColorMap, Variant};

use super::{TerminalPalette, SLOT_NAMES};

/// Chroma multiplier of the optional soften pass.
pub const SOFTEN_CHROMA: f64 = 0.55;

/// User-tunable knobs of the per-slot harmonization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonizeOptions {
    /// 0..1, scales slot chroma.
    pub saturation: f64,
    /// 0..1, 0.5 leaves tone alone; higher is lighter in dark mode and darker
    /// in light mode.
    pub brightness: f64,
    /// 0..1, fraction of the hue distance to rotate toward the anchor.
    pub harmony: f64,
    /// Maximum rotation in degrees.
    pub threshold: f64,
    pub soften: bool,
    /// Derive term0/term15 from the surface roles instead of the source slots.
    pub blend_bg_fg: bool,
    /// Leave every slot untouched for the monochrome variant.
    pub skip_monochrome: bool,
}

impl Default for HarmonizeOptions {
    fn default() -> Self {
        Self {
            saturation: 0.40,
            brightness: 0.55,
            harmony: 0.8,
            threshold: 100.0,
            soften: false,
            blend_bg_fg: false,
            skip_monochrome: false,
        }
    }
}

/// Rotate `design`'s hue toward `anchor_hue` by `harmony` of their distance,
/// at most `threshold` degrees. Chroma and tone are kept.
pub fn harmonize(design: Hct, anchor_hue: f64, threshold: f64, harmony: f64) -> Hct {
    let rotation = (hue_distance(design.hue(), anchor_hue) * harmony).min(threshold);
    let hue = sanitize_degrees(
        design.hue() + rotation * rotation_direction(design.hue(), anchor_hue),
    );
    Hct::from_hct(hue, design.chroma(), design.tone())
}

/// Step A: harmonize every slot of `source` toward `anchor`.
///
/// Slots that fail to parse are logged and passed through unchanged.
pub fn harmonize_palette(
    source: &TerminalPalette,
    roles: &RoleColorMap,
    anchor: Hct,
    variant: Variant,
    dark: bool,
    options: &HarmonizeOptions,
) -> TerminalPalette {
    if options.skip_monochrome && variant == Variant::Monochrome {
        return source.clone();
    }
    let soften = options.soften && !variant.is_low_chroma();

    TerminalPalette::from_fn(|index| {
        let value = source.get(index);
        match harmonize_slot(index, value, roles, anchor, dark, options) {
            Ok(hct) => {
                let hct = if soften {
                    hct.scaled(SOFTEN_CHROMA, 1.0)
                } else {
                    hct
                };
                Color::from_hct(hct).to_hex_upper()
            }
            Err(e) => {
                warn!("{e}");
                value.to_string()
            }
        }
    })
}

fn harmonize_slot(
    index: usize,
    value: &str,
    roles: &RoleColorMap,
    anchor: Hct,
    dark: bool,
    options: &HarmonizeOptions,
) -> Result<Hct, SlotError> {
    if options.blend_bg_fg {
        let blended = match index {
            0 => roles.role(Role::SurfaceContainerLow).map(|c| (c, 0.7, 0.98)),
            15 => roles.role(Role::OnSurface).map(|c| (c, 1.5, 1.0)),
            _ => None,
        };
        if let Some((color, chroma, tone)) = blended {
            return Ok(color.to_hct().scaled(chroma, tone));
        }
    }

    let hct = Color::from_hex(value)
        .map_err(|source| SlotError {
            slot: SLOT_NAMES[index].to_string(),
            source,
        })?
        .to_hct();

    let out = match index {
        // Grays: barely rotated, tone untouched.
        7 | 8 => harmonize(hct, anchor.hue(), options.threshold * 0.3, options.harmony * 0.4)
            .scaled(options.saturation * 1.2, 1.0),
        _ => {
            let sign = if dark { 1.0 } else { -1.0 };
            let tone = 1.0 + (options.brightness - 0.5) * 0.4 * sign;
            harmonize(hct, anchor.hue(), options.threshold * 0.7, options.harmony)
                .scaled(options.saturation * 1.5, tone)
        }
    };
    Ok(out)
}
