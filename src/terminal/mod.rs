//! The 16-slot terminal palette: source construction and harmonization.

pub mod harmonize;
pub mod source;
pub mod spread;

use log::debug;

use crate::color::Color;
use crate::hct::Hct;
use crate::scheme::{Role, RoleColorMap, Variant};

pub use harmonize::HarmonizeOptions;
pub use source::TermScheme;

pub const SLOT_COUNT: usize = 16;

/// Slot names in order, `term0` .. `term15`.
pub const SLOT_NAMES: [&str; SLOT_COUNT] = [
    "term0", "term1", "term2", "term3", "term4", "term5", "term6", "term7", "term8", "term9",
    "term10", "term11", "term12", "term13", "term14", "term15",
];

/// Sixteen terminal colors as hex strings. 0-7 normal, 8-15 bright; slot 0 is
/// the background and 7/15 the foregrounds.
///
/// Values are kept as text so a malformed entry from a scheme file can travel
/// through untouched instead of failing the whole palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalPalette {
    slots: [String; SLOT_COUNT],
}

impl TerminalPalette {
    pub fn from_fn(f: impl FnMut(usize) -> String) -> Self {
        Self {
            slots: std::array::from_fn(f),
        }
    }

    pub fn get(&self, index: usize) -> &str {
        &self.slots[index]
    }

    /// Parse a slot as a color.
    pub fn color(&self, index: usize) -> Option<Color> {
        Color::from_hex(&self.slots[index]).ok()
    }

    pub fn slot_index(name: &str) -> Option<usize> {
        SLOT_NAMES.iter().position(|n| *n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        SLOT_NAMES
            .iter()
            .copied()
            .zip(self.slots.iter().map(String::as_str))
    }
}

/// Source and harmonized versions of the terminal palette.
#[derive(Debug, Clone)]
pub struct TerminalColors {
    pub source: TerminalPalette,
    pub harmonized: TerminalPalette,
}

/// Hue the terminal palette is pulled toward: the primary key color.
pub fn anchor_of(roles: &RoleColorMap) -> Hct {
    roles
        .role(Role::PrimaryPaletteKeyColor)
        .or_else(|| roles.role(Role::Primary))
        .map(Color::to_hct)
        .unwrap_or_else(|| Hct::from_argb(0xff9a82ff))
}

/// Build the terminal palette for a synthesized scheme: material defaults,
/// optionally re-tinted by a scheme file, then harmonized (Step A) and spread
/// (Step B).
pub fn build(
    roles: &RoleColorMap,
    file_slots: Option<&[(String, String)]>,
    variant: Variant,
    dark: bool,
    options: &HarmonizeOptions,
) -> TerminalColors {
    let mut source = source::material_source(roles, dark);
    if let Some(file_slots) = file_slots {
        source = source::retint_from_file(&source, file_slots);
    }

    let anchor = anchor_of(roles);
    debug!(
        "harmonizing terminal palette toward hue {:.1}",
        anchor.hue()
    );

    let stepped = harmonize::harmonize_palette(&source, roles, anchor, variant, dark, options);
    let harmonized = spread::enforce_spread(&stepped, &source, dark, anchor);

    TerminalColors { source, harmonized }
}
