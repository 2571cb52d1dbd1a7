use std::path::PathBuf;

use clap::Parser;

/// Generate Material You color schemes and terminal palettes from a wallpaper
/// or an accent color.
#[derive(Parser, Debug)]
#[command(name = "wallhue", version, about)]
pub struct Args {
    /// Generate the scheme from this image
    #[arg(long, conflicts_with = "color")]
    pub path: Option<PathBuf>,

    /// Generate the scheme from this color (#RRGGBB)
    #[arg(long)]
    pub color: Option<String>,

    /// Bitmap size the image is shrunk to before quantization
    #[arg(long, default_value_t = 128)]
    pub size: u32,

    /// Dark or light scheme
    #[arg(long, value_enum, default_value_t = ThemeMode::Dark)]
    pub mode: ThemeMode,

    /// Scheme variant, e.g. tonal-spot or scheme-tonal-spot
    #[arg(long, default_value = "vibrant")]
    pub scheme: String,

    /// Use the neutral variant when the image's seed is close to gray
    #[arg(long)]
    pub smart: bool,

    /// Opaque or transparent surfaces, passed through to the SCSS output
    #[arg(long, value_enum, default_value_t = Transparency::Opaque)]
    pub transparency: Transparency,

    /// JSON file with "dark" and "light" terminal slot maps
    #[arg(long)]
    pub termscheme: Option<PathBuf>,

    /// (0-1) Terminal hue shift toward the primary color
    #[arg(long, default_value_t = 0.8)]
    pub harmony: f64,

    /// (0-180) Maximum terminal hue shift in degrees
    #[arg(long, default_value_t = 100.0)]
    pub harmonize_threshold: f64,

    /// (0-1) Terminal color saturation
    #[arg(long, default_value_t = 0.40)]
    pub term_saturation: f64,

    /// (0-1) Terminal color brightness
    #[arg(long, default_value_t = 0.55)]
    pub term_brightness: f64,

    /// Derive terminal background and foreground from the surface colors
    #[arg(long)]
    pub blend_bg_fg: bool,

    /// Soften generated colors
    #[arg(long)]
    pub soften: bool,

    /// Contrast level, -1 (less) to 1 (more)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub contrast: f64,

    /// Write the chosen seed color to this file
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Write UI colors JSON to this file
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Write a Zed theme to this file
    #[arg(long)]
    pub zed_output: Option<PathBuf>,

    /// Take the Zed terminal colors from an SCSS variables file written earlier
    #[arg(long, requires = "zed_output")]
    pub terminal_scss: Option<PathBuf>,

    /// Write SCSS variables to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a colored report instead of the SCSS variables
    #[arg(long)]
    pub debug: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Transparency {
    Opaque,
    Transparent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_documented_values() {
        let args = Args::parse_from(["wallhue", "--color", "#7AA2F7"]);
        assert_eq!(args.mode, ThemeMode::Dark);
        assert_eq!(args.scheme, "vibrant");
        assert_eq!(args.size, 128);
        assert_eq!(args.harmony, 0.8);
        assert_eq!(args.harmonize_threshold, 100.0);
        assert_eq!(args.term_saturation, 0.40);
        assert_eq!(args.term_brightness, 0.55);
        assert_eq!(args.transparency, Transparency::Opaque);
        assert!(!args.soften && !args.smart && !args.blend_bg_fg && !args.debug);
    }

    #[test]
    fn path_and_color_conflict() {
        let result = Args::try_parse_from(["wallhue", "--path", "a.png", "--color", "#ffffff"]);
        assert!(result.is_err());
    }

    #[test]
    fn terminal_scss_needs_zed_output() {
        let result =
            Args::try_parse_from(["wallhue", "--color", "#000000", "--terminal-scss", "a.scss"]);
        assert!(result.is_err());
        let args = Args::parse_from([
            "wallhue",
            "--color",
            "#000000",
            "--terminal-scss",
            "a.scss",
            "--zed-output",
            "zed.json",
        ]);
        assert_eq!(args.terminal_scss, Some(PathBuf::from("a.scss")));
    }

    #[test]
    fn verbosity_counts() {
        let args = Args::parse_from(["wallhue", "-vv", "--color", "#000000"]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn negative_contrast_is_accepted() {
        let args = Args::parse_from(["wallhue", "--color", "#000000", "--contrast", "-0.5"]);
        assert_eq!(args.contrast, -0.5);
    }
}
