//! Run configuration, built once from the command line.

use std::path::PathBuf;

use log::warn;

use crate::cli::{Args, ThemeMode, Transparency};
use crate::color::Color;
use crate::error::InputError;
use crate::pipeline::extract::DEFAULT_BITMAP_SIZE;
use crate::scheme::Variant;
use crate::terminal::HarmonizeOptions;

/// Where the seed color comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSource {
    Image(PathBuf),
    Color(Color),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub seed: SeedSource,
    pub bitmap_size: u32,
    pub dark: bool,
    pub variant: Variant,
    /// Switch to the neutral variant for near-gray image seeds.
    pub smart: bool,
    pub transparent: bool,
    pub termscheme: Option<PathBuf>,
    pub harmonize: HarmonizeOptions,
    /// Soften the scheme roles (the terminal soften flag lives in `harmonize`).
    pub soften: bool,
    pub contrast: f64,
    pub cache: Option<PathBuf>,
    pub json_output: Option<PathBuf>,
    pub zed_output: Option<PathBuf>,
    /// Variables file whose terminal slots replace the generated ones in the
    /// Zed theme.
    pub terminal_scss: Option<PathBuf>,
    /// SCSS destination; stdout when `None`.
    pub output: Option<PathBuf>,
    pub debug: bool,
}

impl Config {
    /// Defaults for everything but the seed.
    pub fn new(seed: SeedSource) -> Self {
        Self {
            seed,
            bitmap_size: DEFAULT_BITMAP_SIZE,
            dark: true,
            variant: Variant::Vibrant,
            smart: false,
            transparent: false,
            termscheme: None,
            harmonize: HarmonizeOptions::default(),
            soften: false,
            contrast: 0.0,
            cache: None,
            json_output: None,
            zed_output: None,
            terminal_scss: None,
            output: None,
            debug: false,
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, InputError> {
        let seed = match (&args.path, &args.color) {
            (Some(path), _) => SeedSource::Image(path.clone()),
            (None, Some(hex)) => SeedSource::Color(Color::from_hex(hex)?),
            (None, None) => return Err(InputError::MissingSeed),
        };

        let harmonize = HarmonizeOptions {
            saturation: unit("term-saturation", args.term_saturation),
            brightness: unit("term-brightness", args.term_brightness),
            harmony: unit("harmony", args.harmony),
            threshold: args.harmonize_threshold.clamp(0.0, 180.0),
            soften: args.soften,
            blend_bg_fg: args.blend_bg_fg,
            skip_monochrome: false,
        };

        Ok(Self {
            seed,
            bitmap_size: args.size.max(1),
            dark: args.mode == ThemeMode::Dark,
            variant: Variant::parse_lenient(&args.scheme),
            smart: args.smart,
            transparent: args.transparency == Transparency::Transparent,
            termscheme: args.termscheme.clone(),
            harmonize,
            soften: args.soften,
            contrast: unit_signed("contrast", args.contrast),
            cache: args.cache.clone(),
            json_output: args.json_output.clone(),
            zed_output: args.zed_output.clone(),
            terminal_scss: args.terminal_scss.clone(),
            output: args.output.clone(),
            debug: args.debug,
        })
    }
}

fn unit(name: &str, value: f64) -> f64 {
    clamp_warn(name, value, 0.0, 1.0)
}

fn unit_signed(name: &str, value: f64) -> f64 {
    clamp_warn(name, value, -1.0, 1.0)
}

fn clamp_warn(name: &str, value: f64, min: f64, max: f64) -> f64 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!("--{name} {value} is outside [{min}, {max}], using {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(argv: &[&str]) -> Result<Config, InputError> {
        let mut full = vec!["wallhue"];
        full.extend_from_slice(argv);
        Config::from_args(&Args::parse_from(full))
    }

    #[test]
    fn color_seed_is_parsed() {
        let config = config(&["--color", "#7AA2F7"]).unwrap();
        assert_eq!(config.seed, SeedSource::Color(Color::new(0x7a, 0xa2, 0xf7)));
        assert_eq!(config.variant, Variant::Vibrant);
        assert!(config.dark);
        assert_eq!(config.harmonize, HarmonizeOptions::default());
    }

    #[test]
    fn image_seed_keeps_path() {
        let config = config(&["--path", "wall.png", "--mode", "light"]).unwrap();
        assert_eq!(config.seed, SeedSource::Image(PathBuf::from("wall.png")));
        assert!(!config.dark);
    }

    #[test]
    fn missing_seed_is_an_error() {
        assert!(matches!(config(&[]), Err(InputError::MissingSeed)));
    }

    #[test]
    fn bad_hex_is_an_error() {
        assert!(matches!(
            config(&["--color", "#12"]),
            Err(InputError::InvalidHex { .. })
        ));
    }

    #[test]
    fn unknown_scheme_falls_back_to_tonal_spot() {
        let config = config(&["--color", "#000000", "--scheme", "sepia"]).unwrap();
        assert_eq!(config.variant, Variant::TonalSpot);
    }

    #[test]
    fn prefixed_scheme_names_are_accepted() {
        let config = config(&["--color", "#000000", "--scheme", "scheme-fruit-salad"]).unwrap();
        assert_eq!(config.variant, Variant::FruitSalad);
    }

    #[test]
    fn out_of_range_knobs_are_clamped() {
        let config = config(&[
            "--color",
            "#000000",
            "--harmony",
            "3",
            "--contrast",
            "-4",
            "--harmonize-threshold",
            "500",
        ])
        .unwrap();
        assert_eq!(config.harmonize.harmony, 1.0);
        assert_eq!(config.contrast, -1.0);
        assert_eq!(config.harmonize.threshold, 180.0);
    }

    #[test]
    fn terminal_scss_is_carried() {
        let config = config(&[
            "--color",
            "#000000",
            "--zed-output",
            "zed.json",
            "--terminal-scss",
            "colors.scss",
        ])
        .unwrap();
        assert_eq!(config.terminal_scss, Some(PathBuf::from("colors.scss")));
        assert_eq!(config.zed_output, Some(PathBuf::from("zed.json")));
    }

    #[test]
    fn soften_reaches_both_stages() {
        let config = config(&["--color", "#000000", "--soften"]).unwrap();
        assert!(config.soften && config.harmonize.soften);
    }
}
