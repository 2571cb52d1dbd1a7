//! Material You color schemes and harmonized terminal palettes from a
//! wallpaper or a single accent color.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod hct;
pub mod pipeline;
pub mod report;
pub mod scheme;
pub mod terminal;

use std::io::{self, Write};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::color::Color;
use crate::config::{Config, SeedSource};
use crate::export::{scss, Exporter, Output, ScssExport, UiColors, UiJsonExport, ZedExport};
use crate::scheme::{RoleColorMap, Variant};
use crate::terminal::{TermScheme, TerminalColors, TerminalPalette};

/// Image seeds below this chroma switch `--smart` runs to the neutral variant.
pub const SMART_CHROMA_THRESHOLD: f64 = 20.0;

/// Everything one run produces, before any of it is written.
#[derive(Debug, Clone)]
pub struct Generated {
    pub seed: Color,
    pub from_image: bool,
    pub variant: Variant,
    pub dark: bool,
    pub roles: RoleColorMap,
    pub terminal: TerminalColors,
    pub ui: UiColors,
}

/// Resolve the seed and synthesize roles, terminal palette and UI colors.
pub fn generate(config: &Config) -> Result<Generated> {
    let (seed, from_image) = match &config.seed {
        SeedSource::Image(path) => {
            let seed = pipeline::seed_from_image(path, config.bitmap_size)
                .with_context(|| format!("failed to extract a seed from {}", path.display()))?;
            (seed, true)
        }
        SeedSource::Color(color) => (*color, false),
    };

    let seed_hct = seed.to_hct();
    let variant = if config.smart && from_image && seed_hct.chroma() < SMART_CHROMA_THRESHOLD {
        info!(
            "seed chroma {:.1} is low, using {}",
            seed_hct.chroma(),
            Variant::Neutral
        );
        Variant::Neutral
    } else {
        config.variant
    };

    let roles = scheme::synthesize(seed_hct, variant, config.dark, config.contrast, config.soften);

    let file_slots = match &config.termscheme {
        Some(path) => Some(TermScheme::load(path)?.slots(config.dark)),
        None => None,
    };
    let terminal = terminal::build(
        &roles,
        file_slots.as_deref(),
        variant,
        config.dark,
        &config.harmonize,
    );
    let ui = UiColors::from_roles(&roles);
    debug!("generated {} roles from seed {seed}", roles.len());

    Ok(Generated {
        seed,
        from_image,
        variant,
        dark: config.dark,
        roles,
        terminal,
        ui,
    })
}

/// Run one invocation: generate, render every requested document, then write.
///
/// All documents are rendered before the first file is touched and written
/// together, so a failed render or write leaves no partial output behind.
pub fn run(config: &Config) -> Result<()> {
    let generated = generate(config)?;

    let variables = ScssExport {
        roles: &generated.roles,
        terminal: &generated.terminal.harmonized,
        dark: generated.dark,
        transparent: config.transparent,
    };

    let mut outputs = Vec::new();
    if let Some(path) = &config.json_output {
        let json = UiJsonExport {
            colors: &generated.ui,
        };
        outputs.push(Output::render(path, &json)?);
    }
    if let Some(path) = &config.zed_output {
        let terminal = zed_terminal(config, &generated)?;
        let zed = ZedExport {
            ui: &generated.ui,
            terminal: &terminal,
        };
        outputs.push(Output::render(path, &zed)?);
    }
    if let (Some(path), true) = (&config.cache, generated.from_image) {
        outputs.push(Output {
            path: path.as_path(),
            what: "seed cache".to_string(),
            content: generated.seed.to_hex_upper(),
        });
    }

    let stdout_scss = match (&config.output, config.debug) {
        (_, true) => None,
        (Some(path), false) => {
            outputs.push(Output::render(path, &variables)?);
            None
        }
        (None, false) => Some(variables.render()?),
    };

    export::write_all(&outputs)?;

    if config.debug {
        report::print_report(&generated).context("failed to print report")?;
    } else if let Some(text) = stdout_scss {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.flush())
            .context("failed to write SCSS variables to stdout")?;
    }
    Ok(())
}

/// Terminal slots for the Zed theme: an earlier variables file when one is
/// given, the generated palette otherwise.
fn zed_terminal(config: &Config, generated: &Generated) -> Result<TerminalPalette> {
    match &config.terminal_scss {
        Some(path) => scss::read_terminal(path),
        None => Ok(generated.terminal.harmonized.clone()),
    }
}
