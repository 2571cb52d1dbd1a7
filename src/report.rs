//! Human-readable report with colored swatches, shown by `--debug`.

use std::io::{self, Write};

use crossterm::style::{Color as TermColor, Stylize};

use crate::color::Color;
use crate::Generated;

const SWATCH: &str = "   ";

fn to_term(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// A swatch for `hex`, or blanks when it does not parse.
fn swatch(hex: &str) -> String {
    match Color::from_hex(hex) {
        Ok(color) => SWATCH.on(to_term(color)).to_string(),
        Err(_) => SWATCH.to_string(),
    }
}

fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{:-^47}", title)
}

/// Write the report for one run.
pub fn write_report(out: &mut impl Write, generated: &Generated) -> io::Result<()> {
    heading(out, "Selected color")?;
    writeln!(out, "Dark mode: {}", generated.dark)?;
    writeln!(out, "Scheme: {}", generated.variant)?;
    let seed = generated.seed;
    writeln!(
        out,
        "Accent color: {} {}",
        swatch(&seed.to_hex()),
        seed.to_hex_upper()
    )?;
    let hct = seed.to_hct();
    writeln!(
        out,
        "HCT: {:.2}  {:.2}  {:.2}",
        hct.hue(),
        hct.chroma(),
        hct.tone()
    )?;

    heading(out, "Material colors")?;
    for (name, color) in generated.roles.iter() {
        let hex = color.to_hex_upper();
        writeln!(out, "{:<32} : {}  {}", name, swatch(&hex), hex)?;
    }

    heading(out, "Harmonize terminal colors")?;
    let terminal = &generated.terminal;
    let background = terminal.harmonized.color(0);
    for ((name, source), (_, harmonized)) in terminal.source.iter().zip(terminal.harmonized.iter()) {
        write!(
            out,
            "{:<6} : {} {} --> {} {}",
            name,
            swatch(source),
            source,
            swatch(harmonized),
            harmonized
        )?;
        match (background, Color::from_hex(harmonized).ok()) {
            (Some(bg), Some(fg)) if name != "term0" => {
                writeln!(out, "  {:>5.2}:1", Color::contrast_ratio(&fg, &bg))?
            }
            _ => writeln!(out)?,
        }
    }
    writeln!(out, "{}", "-".repeat(47))
}

/// Print the report to stdout.
pub fn print_report(generated: &Generated) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_report(&mut lock, generated)?;
    lock.flush()
}
