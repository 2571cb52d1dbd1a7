use crate::color::Color;

/// Which of the core palettes a role draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
    NeutralVariant,
    Error,
}

macro_rules! roles {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Semantic color roles, in output order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Role {
            $($variant),+
        }

        impl Role {
            pub const ALL: &'static [Role] = &[$(Role::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(Role::$variant => $name),+
                }
            }
        }
    };
}

roles! {
    PrimaryPaletteKeyColor => "primary_paletteKeyColor",
    SecondaryPaletteKeyColor => "secondary_paletteKeyColor",
    TertiaryPaletteKeyColor => "tertiary_paletteKeyColor",
    NeutralPaletteKeyColor => "neutral_paletteKeyColor",
    NeutralVariantPaletteKeyColor => "neutral_variant_paletteKeyColor",
    Background => "background",
    OnBackground => "onBackground",
    Surface => "surface",
    SurfaceDim => "surfaceDim",
    SurfaceBright => "surfaceBright",
    SurfaceContainerLowest => "surfaceContainerLowest",
    SurfaceContainerLow => "surfaceContainerLow",
    SurfaceContainer => "surfaceContainer",
    SurfaceContainerHigh => "surfaceContainerHigh",
    SurfaceContainerHighest => "surfaceContainerHighest",
    OnSurface => "onSurface",
    SurfaceVariant => "surfaceVariant",
    OnSurfaceVariant => "onSurfaceVariant",
    InverseSurface => "inverseSurface",
    InverseOnSurface => "inverseOnSurface",
    Outline => "outline",
    OutlineVariant => "outlineVariant",
    Shadow => "shadow",
    Scrim => "scrim",
    SurfaceTint => "surfaceTint",
    Primary => "primary",
    OnPrimary => "onPrimary",
    PrimaryContainer => "primaryContainer",
    OnPrimaryContainer => "onPrimaryContainer",
    InversePrimary => "inversePrimary",
    Secondary => "secondary",
    OnSecondary => "onSecondary",
    SecondaryContainer => "secondaryContainer",
    OnSecondaryContainer => "onSecondaryContainer",
    Tertiary => "tertiary",
    OnTertiary => "onTertiary",
    TertiaryContainer => "tertiaryContainer",
    OnTertiaryContainer => "onTertiaryContainer",
    Error => "error",
    OnError => "onError",
    ErrorContainer => "errorContainer",
    OnErrorContainer => "onErrorContainer",
    PrimaryFixed => "primaryFixed",
    PrimaryFixedDim => "primaryFixedDim",
    OnPrimaryFixed => "onPrimaryFixed",
    OnPrimaryFixedVariant => "onPrimaryFixedVariant",
    SecondaryFixed => "secondaryFixed",
    SecondaryFixedDim => "secondaryFixedDim",
    OnSecondaryFixed => "onSecondaryFixed",
    OnSecondaryFixedVariant => "onSecondaryFixedVariant",
    TertiaryFixed => "tertiaryFixed",
    TertiaryFixedDim => "tertiaryFixedDim",
    OnTertiaryFixed => "onTertiaryFixed",
    OnTertiaryFixedVariant => "onTertiaryFixedVariant",
}

/// How a role picks its tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneRule {
    /// The palette's key color.
    KeyColor,
    Fixed(f64),
    /// (dark, light)
    ByMode(f64, f64),
}

impl ToneRule {
    pub fn resolve(self, dark: bool) -> Option<f64> {
        match self {
            ToneRule::KeyColor => None,
            ToneRule::Fixed(tone) => Some(tone),
            ToneRule::ByMode(dark_tone, light_tone) => Some(if dark { dark_tone } else { light_tone }),
        }
    }
}

impl Role {
    pub fn palette(self) -> PaletteKind {
        use PaletteKind as P;
        use Role::*;
        match self {
            PrimaryPaletteKeyColor | SurfaceTint | Primary | OnPrimary | PrimaryContainer
            | OnPrimaryContainer | InversePrimary | PrimaryFixed | PrimaryFixedDim
            | OnPrimaryFixed | OnPrimaryFixedVariant => P::Primary,
            SecondaryPaletteKeyColor | Secondary | OnSecondary | SecondaryContainer
            | OnSecondaryContainer | SecondaryFixed | SecondaryFixedDim | OnSecondaryFixed
            | OnSecondaryFixedVariant => P::Secondary,
            TertiaryPaletteKeyColor | Tertiary | OnTertiary | TertiaryContainer
            | OnTertiaryContainer | TertiaryFixed | TertiaryFixedDim | OnTertiaryFixed
            | OnTertiaryFixedVariant => P::Tertiary,
            NeutralVariantPaletteKeyColor | SurfaceVariant | OnSurfaceVariant | Outline
            | OutlineVariant => P::NeutralVariant,
            Error | OnError | ErrorContainer | OnErrorContainer => P::Error,
            NeutralPaletteKeyColor | Background | OnBackground | Surface | SurfaceDim
            | SurfaceBright | SurfaceContainerLowest | SurfaceContainerLow | SurfaceContainer
            | SurfaceContainerHigh | SurfaceContainerHighest | OnSurface | InverseSurface
            | InverseOnSurface | Shadow | Scrim => P::Neutral,
        }
    }

    /// Default tone rule shared by all chromatic variants.
    pub fn tone_rule(self) -> ToneRule {
        use Role::*;
        use ToneRule::*;
        match self {
            PrimaryPaletteKeyColor
            | SecondaryPaletteKeyColor
            | TertiaryPaletteKeyColor
            | NeutralPaletteKeyColor
            | NeutralVariantPaletteKeyColor => KeyColor,
            Background | Surface => ByMode(6.0, 98.0),
            OnBackground | OnSurface => ByMode(90.0, 10.0),
            SurfaceDim => ByMode(6.0, 87.0),
            SurfaceBright => ByMode(24.0, 98.0),
            SurfaceContainerLowest => ByMode(4.0, 100.0),
            SurfaceContainerLow => ByMode(10.0, 96.0),
            SurfaceContainer => ByMode(12.0, 94.0),
            SurfaceContainerHigh => ByMode(17.0, 92.0),
            SurfaceContainerHighest => ByMode(22.0, 90.0),
            SurfaceVariant => ByMode(30.0, 90.0),
            OnSurfaceVariant => ByMode(80.0, 30.0),
            InverseSurface => ByMode(90.0, 20.0),
            InverseOnSurface => ByMode(20.0, 95.0),
            Outline => ByMode(60.0, 50.0),
            OutlineVariant => ByMode(30.0, 80.0),
            Shadow | Scrim => Fixed(0.0),
            SurfaceTint | Primary | Secondary | Tertiary | Error => ByMode(80.0, 40.0),
            OnPrimary | OnSecondary | OnTertiary | OnError => ByMode(20.0, 100.0),
            PrimaryContainer | SecondaryContainer | TertiaryContainer | ErrorContainer => {
                ByMode(30.0, 90.0)
            }
            OnPrimaryContainer | OnSecondaryContainer | OnTertiaryContainer
            | OnErrorContainer => ByMode(90.0, 10.0),
            InversePrimary => ByMode(40.0, 80.0),
            PrimaryFixed | SecondaryFixed | TertiaryFixed => Fixed(90.0),
            PrimaryFixedDim | SecondaryFixedDim | TertiaryFixedDim => Fixed(80.0),
            OnPrimaryFixed | OnSecondaryFixed | OnTertiaryFixed => Fixed(10.0),
            OnPrimaryFixedVariant | OnSecondaryFixedVariant | OnTertiaryFixedVariant => {
                Fixed(30.0)
            }
        }
    }

    /// Overrides for the monochrome variant, whose accents are pure grays and
    /// need their own tone ladder to stay distinguishable.
    pub fn monochrome_tone_rule(self) -> Option<ToneRule> {
        use Role::*;
        use ToneRule::*;
        let rule = match self {
            Primary => ByMode(100.0, 0.0),
            OnPrimary => ByMode(10.0, 90.0),
            PrimaryContainer => ByMode(85.0, 25.0),
            OnPrimaryContainer => ByMode(0.0, 100.0),
            SecondaryContainer => ByMode(30.0, 85.0),
            Tertiary => ByMode(90.0, 25.0),
            OnTertiary => ByMode(10.0, 90.0),
            TertiaryContainer => ByMode(60.0, 49.0),
            OnTertiaryContainer => ByMode(0.0, 100.0),
            PrimaryFixed => Fixed(40.0),
            PrimaryFixedDim => Fixed(30.0),
            OnPrimaryFixed => Fixed(100.0),
            OnPrimaryFixedVariant => Fixed(90.0),
            SecondaryFixed => Fixed(80.0),
            SecondaryFixedDim => Fixed(70.0),
            OnSecondaryFixed => Fixed(10.0),
            OnSecondaryFixedVariant => Fixed(25.0),
            TertiaryFixed => Fixed(40.0),
            TertiaryFixedDim => Fixed(30.0),
            OnTertiaryFixed => Fixed(100.0),
            OnTertiaryFixedVariant => Fixed(90.0),
            _ => return None,
        };
        Some(rule)
    }

    /// The role this one is drawn on top of, if any. Foreground roles keep a
    /// minimum tone distance from it.
    pub fn background(self) -> Option<Role> {
        use Role::*;
        let background = match self {
            OnBackground => Background,
            OnSurface => Surface,
            OnSurfaceVariant => SurfaceVariant,
            InverseOnSurface => InverseSurface,
            OnPrimary => Primary,
            OnPrimaryContainer => PrimaryContainer,
            OnSecondary => Secondary,
            OnSecondaryContainer => SecondaryContainer,
            OnTertiary => Tertiary,
            OnTertiaryContainer => TertiaryContainer,
            OnError => Error,
            OnErrorContainer => ErrorContainer,
            OnPrimaryFixed | OnPrimaryFixedVariant => PrimaryFixedDim,
            OnSecondaryFixed | OnSecondaryFixedVariant => SecondaryFixedDim,
            OnTertiaryFixed | OnTertiaryFixedVariant => TertiaryFixedDim,
            _ => return None,
        };
        Some(background)
    }
}

/// Synthesized role colors, in role order followed by the fixed extras.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleColorMap {
    entries: Vec<(&'static str, Color)>,
}

impl RoleColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &'static str, color: Color) {
        self.entries.push((name, color));
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    pub fn role(&self, role: Role) -> Option<Color> {
        self.get(role.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Color)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(&'static str, Color)> for RoleColorMap {
    fn from_iter<I: IntoIterator<Item = (&'static str, Color)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
