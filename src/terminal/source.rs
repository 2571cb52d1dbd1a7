use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use crate::color::Color;
use crate::error::InputError;
use crate::hct::Hct;
use crate::scheme::{Role, RoleColorMap};

use super::{TerminalPalette, SLOT_COUNT};

/// Minimum chroma a re-tinted scheme-file slot keeps.
const RETINT_MIN_CHROMA: f64 = 18.0;

/// Where each default slot comes from: (dark role, light role, fallback hex).
const MATERIAL_SLOTS: [(Role, Role, &str); SLOT_COUNT] = [
    (Role::SurfaceContainerLow, Role::Surface, "#1E1E1E"),
    (Role::Primary, Role::Primary, "#9A82FF"),
    (Role::Secondary, Role::Secondary, "#89D1C5"),
    (Role::Tertiary, Role::Tertiary, "#F2B8C6"),
    (Role::PrimaryContainer, Role::PrimaryContainer, "#4F378A"),
    (Role::SecondaryContainer, Role::SecondaryContainer, "#4A635E"),
    (Role::TertiaryContainer, Role::TertiaryContainer, "#633B48"),
    (Role::OnSurface, Role::OnSurface, "#E6E1E5"),
    (Role::SurfaceContainerHigh, Role::SurfaceBright, "#2A2A2A"),
    (Role::OnPrimary, Role::OnPrimary, "#0F0A1C"),
    (Role::OnSecondary, Role::OnSecondary, "#0D1F1A"),
    (Role::OnTertiary, Role::OnTertiary, "#251420"),
    // Falls back to primary when absent, see `material_source`.
    (Role::InversePrimary, Role::InversePrimary, ""),
    (Role::Outline, Role::Outline, "#928F99"),
    (Role::OutlineVariant, Role::OutlineVariant, "#49454F"),
    (Role::OnSurfaceVariant, Role::OnSurfaceVariant, "#CAC4D0"),
];

/// Default terminal palette taken straight from the scheme's roles.
pub fn material_source(roles: &RoleColorMap, dark: bool) -> TerminalPalette {
    let pick = |role: Role, fallback: &str| {
        roles
            .role(role)
            .map(Color::to_hex_upper)
            .unwrap_or_else(|| fallback.to_string())
    };
    let primary = pick(Role::Primary, MATERIAL_SLOTS[1].2);

    TerminalPalette::from_fn(|i| {
        let (dark_role, light_role, fallback) = MATERIAL_SLOTS[i];
        let role = if dark { dark_role } else { light_role };
        if fallback.is_empty() {
            pick(role, &primary)
        } else {
            pick(role, fallback)
        }
    })
}

/// A terminal scheme file: one slot map per mode.
#[derive(Debug, Clone, Deserialize)]
pub struct TermScheme {
    dark: BTreeMap<String, String>,
    light: BTreeMap<String, String>,
}

impl TermScheme {
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path).map_err(|e| InputError::scheme_file(path, e))?;
        Self::parse(&text).map_err(|e| InputError::scheme_file(path, e))
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The `termN` entries for one mode, in slot order. Keys that are not
    /// terminal slots are ignored.
    pub fn slots(&self, dark: bool) -> Vec<(String, String)> {
        let map = if dark { &self.dark } else { &self.light };
        let mut slots: Vec<(usize, &String, &String)> = map
            .iter()
            .filter_map(|(key, value)| match TerminalPalette::slot_index(key) {
                Some(index) => Some((index, key, value)),
                None => {
                    debug!("ignoring non-slot key '{key}' in terminal scheme");
                    None
                }
            })
            .collect();
        slots.sort_by_key(|(index, _, _)| *index);
        slots
            .into_iter()
            .map(|(_, key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Re-tint scheme-file slots toward the material defaults: each slot keeps its
/// own tone, takes the material hue, and blends the two chromas.
///
/// A slot whose value (or material counterpart) fails to parse is copied
/// through as written.
pub fn retint_from_file(material: &TerminalPalette, file_slots: &[(String, String)]) -> TerminalPalette {
    let mut slots: [String; SLOT_COUNT] = std::array::from_fn(|i| material.get(i).to_string());

    for (key, value) in file_slots {
        let Some(index) = TerminalPalette::slot_index(key) else {
            continue;
        };
        let parsed = Color::from_hex(value).and_then(|file| {
            Color::from_hex(material.get(index)).map(|target| (file.to_hct(), target.to_hct()))
        });
        slots[index] = match parsed {
            Ok((file, target)) => {
                let chroma = (file.chroma() * 0.5 + target.chroma() * 0.5).max(RETINT_MIN_CHROMA);
                Color::from_hct(Hct::from_hct(target.hue(), chroma, file.tone())).to_hex_upper()
            }
            Err(e) => {
                warn!("{key}: {e}; keeping the value from the scheme file");
                value.clone()
            }
        };
    }

    TerminalPalette::from_fn(|i| std::mem::take(&mut slots[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hct::hue_distance;
    use crate::scheme::{synthesize, Variant};

    fn roles(dark: bool) -> RoleColorMap {
        synthesize(Hct::from_argb(0xff7aa2f7), Variant::TonalSpot, dark, 0.0, false)
    }

    #[test]
    fn material_source_follows_mode() {
        let dark_roles = roles(true);
        let dark = material_source(&dark_roles, true);
        assert_eq!(
            dark.get(0),
            dark_roles.get("surfaceContainerLow").unwrap().to_hex_upper()
        );
        assert_eq!(
            dark.get(8),
            dark_roles.get("surfaceContainerHigh").unwrap().to_hex_upper()
        );

        let light_roles = roles(false);
        let light = material_source(&light_roles, false);
        assert_eq!(
            light.get(0),
            light_roles.get("surface").unwrap().to_hex_upper()
        );
        assert_eq!(
            light.get(8),
            light_roles.get("surfaceBright").unwrap().to_hex_upper()
        );
        assert_eq!(
            light.get(15),
            light_roles.get("onSurfaceVariant").unwrap().to_hex_upper()
        );
    }

    #[test]
    fn material_source_falls_back_to_literals() {
        let empty = RoleColorMap::new();
        let palette = material_source(&empty, true);
        assert_eq!(palette.get(0), "#1E1E1E");
        assert_eq!(palette.get(7), "#E6E1E5");
        assert_eq!(palette.get(12), "#9A82FF");
        assert_eq!(palette.get(14), "#49454F");
    }

    #[test]
    fn inverse_primary_falls_back_to_primary() {
        let only_primary: RoleColorMap = [("primary", Color::new(1, 2, 3))].into_iter().collect();
        let palette = material_source(&only_primary, true);
        assert_eq!(palette.get(12), "#010203");
    }

    #[test]
    fn term_scheme_parses_and_orders_slots() {
        let scheme = TermScheme::parse(
            r##"{"dark": {"term10": "#00ff00", "term2": "#00aa00", "name": "x"},
                 "light": {"term0": "#ffffff"}}"##,
        )
        .unwrap();
        let dark = scheme.slots(true);
        assert_eq!(
            dark,
            vec![
                ("term2".to_string(), "#00aa00".to_string()),
                ("term10".to_string(), "#00ff00".to_string()),
            ]
        );
        assert_eq!(scheme.slots(false).len(), 1);
    }

    #[test]
    fn term_scheme_requires_both_modes() {
        assert!(TermScheme::parse(r#"{"dark": {}}"#).is_err());
        assert!(TermScheme::parse("not json").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = TermScheme::load(Path::new("/nonexistent/scheme.json")).unwrap_err();
        assert!(matches!(err, InputError::SchemeFile { .. }));
    }

    #[test]
    fn retint_keeps_file_tone_and_material_hue() {
        let material = material_source(&roles(true), true);
        let file = vec![("term1".to_string(), "#cc3333".to_string())];
        let retinted = retint_from_file(&material, &file);

        let out = retinted.color(1).unwrap().to_hct();
        let file_hct = Color::from_hex("#cc3333").unwrap().to_hct();
        let target = material.color(1).unwrap().to_hct();
        assert!((out.tone() - file_hct.tone()).abs() < 1.0);
        assert!(hue_distance(out.hue(), target.hue()) < 3.0);
        assert!(out.chroma() >= RETINT_MIN_CHROMA - 1.0);
        // Untouched slots keep the material value.
        assert_eq!(retinted.get(2), material.get(2));
    }

    #[test]
    fn retint_copies_unparseable_slot() {
        let material = material_source(&roles(true), true);
        let file = vec![("term3".to_string(), "rgb(1,2,3)".to_string())];
        let retinted = retint_from_file(&material, &file);
        assert_eq!(retinted.get(3), "rgb(1,2,3)");
    }
}
