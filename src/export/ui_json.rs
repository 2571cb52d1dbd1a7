use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::scheme::{Role, RoleColorMap};

use super::Exporter;

/// Output key and the role it is read from, in output order.
pub const UI_KEYS: [(&str, Role); 34] = [
    ("primary", Role::Primary),
    ("on_primary", Role::OnPrimary),
    ("primary_container", Role::PrimaryContainer),
    ("on_primary_container", Role::OnPrimaryContainer),
    ("secondary", Role::Secondary),
    ("on_secondary", Role::OnSecondary),
    ("secondary_container", Role::SecondaryContainer),
    ("on_secondary_container", Role::OnSecondaryContainer),
    ("tertiary", Role::Tertiary),
    ("on_tertiary", Role::OnTertiary),
    ("tertiary_container", Role::TertiaryContainer),
    ("on_tertiary_container", Role::OnTertiaryContainer),
    ("error", Role::Error),
    ("on_error", Role::OnError),
    ("error_container", Role::ErrorContainer),
    ("on_error_container", Role::OnErrorContainer),
    ("background", Role::Background),
    ("on_background", Role::OnBackground),
    ("surface", Role::Surface),
    ("on_surface", Role::OnSurface),
    ("surface_variant", Role::SurfaceVariant),
    ("on_surface_variant", Role::OnSurfaceVariant),
    ("surface_container", Role::SurfaceContainer),
    ("surface_container_low", Role::SurfaceContainerLow),
    ("surface_container_high", Role::SurfaceContainerHigh),
    ("surface_container_highest", Role::SurfaceContainerHighest),
    ("outline", Role::Outline),
    ("outline_variant", Role::OutlineVariant),
    ("inverse_surface", Role::InverseSurface),
    ("inverse_on_surface", Role::InverseOnSurface),
    ("inverse_primary", Role::InversePrimary),
    ("shadow", Role::Shadow),
    ("scrim", Role::Scrim),
    ("surface_tint", Role::SurfaceTint),
];

/// The flat snake_case color set consumed by UI widgets and the theme
/// exporter. Missing roles are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiColors {
    entries: Vec<(&'static str, String)>,
}

impl UiColors {
    pub fn from_roles(roles: &RoleColorMap) -> Self {
        let entries = UI_KEYS
            .iter()
            .map(|&(key, role)| {
                let value = roles
                    .role(role)
                    .map(|c| c.to_hex_upper())
                    .unwrap_or_default();
                (key, value)
            })
            .collect();
        Self { entries }
    }

    /// Value for `key`, or `None` when it is unknown or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Serialize for UiColors {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = ser.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Two-space indented JSON of [`UiColors`].
pub struct UiJsonExport<'a> {
    pub colors: &'a UiColors,
}

impl Exporter for UiJsonExport<'_> {
    fn name(&self) -> &str {
        "UI colors JSON"
    }

    fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(self.colors).context("failed to serialize UI colors")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::hct::Hct;
    use crate::scheme::{synthesize, Variant};

    #[test]
    fn keys_are_unique_snake_case() {
        let mut seen = std::collections::HashSet::new();
        for (key, _) in UI_KEYS {
            assert!(seen.insert(key), "duplicate key {key}");
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn values_match_role_map() {
        let roles = synthesize(Hct::from_argb(0xff7aa2f7), Variant::Vibrant, true, 0.0, false);
        let colors = UiColors::from_roles(&roles);
        for (key, role) in UI_KEYS {
            let expected = roles.role(role).unwrap().to_hex_upper();
            assert_eq!(colors.get(key), Some(expected.as_str()), "{key}");
        }
    }

    #[test]
    fn missing_roles_become_empty_strings() {
        let roles: RoleColorMap = [("primary", Color::new(0xab, 0xcd, 0xef))].into_iter().collect();
        let colors = UiColors::from_roles(&roles);
        let json = UiJsonExport { colors: &colors }.render().unwrap();
        assert!(json.contains(r##""primary": "#ABCDEF""##));
        assert!(json.contains(r#""on_primary": """#));
        assert_eq!(colors.get("on_primary"), None);
    }

    #[test]
    fn output_keeps_key_order_and_indent() {
        let roles = synthesize(Hct::from_argb(0xff7aa2f7), Variant::TonalSpot, false, 0.0, false);
        let json = UiJsonExport {
            colors: &UiColors::from_roles(&roles),
        }
        .render()
        .unwrap();
        let first = json.lines().nth(1).unwrap();
        assert!(first.starts_with("  \"primary\": \"#"), "{first}");
        let last = json.lines().rev().nth(1).unwrap();
        assert!(last.starts_with("  \"surface_tint\""), "{last}");

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_object().unwrap().len(), 34);
    }
}
