use std::fmt;
use std::str::FromStr;

use log::warn;

/// The closed set of scheme variants. They share one role set and differ only
/// in how the tonal palettes are derived from the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Content,
    Expressive,
    Fidelity,
    FruitSalad,
    Monochrome,
    Neutral,
    Rainbow,
    TonalSpot,
    Vibrant,
}

impl Variant {
    pub const ALL: [Variant; 9] = [
        Variant::Content,
        Variant::Expressive,
        Variant::Fidelity,
        Variant::FruitSalad,
        Variant::Monochrome,
        Variant::Neutral,
        Variant::Rainbow,
        Variant::TonalSpot,
        Variant::Vibrant,
    ];

    /// Identifier as accepted on the command line, e.g. `scheme-tonal-spot`.
    pub fn id(self) -> &'static str {
        match self {
            Variant::Content => "scheme-content",
            Variant::Expressive => "scheme-expressive",
            Variant::Fidelity => "scheme-fidelity",
            Variant::FruitSalad => "scheme-fruit-salad",
            Variant::Monochrome => "scheme-monochrome",
            Variant::Neutral => "scheme-neutral",
            Variant::Rainbow => "scheme-rainbow",
            Variant::TonalSpot => "scheme-tonal-spot",
            Variant::Vibrant => "scheme-vibrant",
        }
    }

    /// Variants whose palettes are already muted; softening skips them.
    pub fn is_low_chroma(self) -> bool {
        matches!(
            self,
            Variant::TonalSpot | Variant::Neutral | Variant::Monochrome
        )
    }

    /// Parse a variant name, falling back to tonal-spot for unknown names.
    pub fn parse_lenient(name: &str) -> Variant {
        name.parse().unwrap_or_else(|_| {
            warn!("unknown scheme '{name}', using {}", Variant::TonalSpot);
            Variant::TonalSpot
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scheme variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    /// Accepts `tonal-spot`, `tonal_spot`, `scheme-tonal-spot` and any casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let bare = normalized.strip_prefix("scheme-").unwrap_or(&normalized);
        Variant::ALL
            .into_iter()
            .find(|v| &v.id()["scheme-".len()..] == bare)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}
