use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::scheme::RoleColorMap;
use crate::terminal::{TerminalPalette, SLOT_COUNT};

use super::Exporter;

/// Slot value used by [`parse_terminal`] when a file lacks a `$termN` line.
const MISSING_SLOT: &str = "#ffffff";

/// Flat `$name: value;` variable listing: mode flags, every role, then every
/// terminal slot.
pub struct ScssExport<'a> {
    pub roles: &'a RoleColorMap,
    pub terminal: &'a TerminalPalette,
    pub dark: bool,
    pub transparent: bool,
}

impl Exporter for ScssExport<'_> {
    fn name(&self) -> &str {
        "SCSS variables"
    }

    fn render(&self) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "$darkmode: {};", self.dark)?;
        writeln!(out, "$transparent: {};", self.transparent)?;
        for (name, color) in self.roles.iter() {
            writeln!(out, "${}: {};", name, color.to_hex_upper())?;
        }
        for (name, value) in self.terminal.iter() {
            writeln!(out, "${name}: {value};")?;
        }
        Ok(out)
    }
}

/// Every `$name: #rrggbb;` line of a variables file, names in file order and
/// values lower-cased. Lines of any other shape are ignored.
pub fn parse_variables(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let (name, value) = line.trim().strip_prefix('$')?.split_once(':')?;
            let value = value.trim().strip_suffix(';')?.trim();
            let name_ok = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            let digits = value.strip_prefix('#')?;
            let value_ok = digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit());
            (name_ok && value_ok).then(|| (name.to_string(), value.to_ascii_lowercase()))
        })
        .collect()
}

/// Terminal slots of a variables file. Slots the file does not define are
/// white.
pub fn parse_terminal(text: &str) -> TerminalPalette {
    let mut slots: [Option<String>; SLOT_COUNT] = Default::default();
    for (name, value) in parse_variables(text) {
        if let Some(index) = TerminalPalette::slot_index(&name) {
            slots[index] = Some(value);
        }
    }
    TerminalPalette::from_fn(|i| {
        slots[i].take().unwrap_or_else(|| MISSING_SLOT.to_string())
    })
}

/// Read the terminal slots back from a variables file written by an earlier
/// run.
pub fn read_terminal(path: &Path) -> Result<TerminalPalette> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read SCSS variables from {}", path.display()))?;
    let found = parse_variables(&text)
        .iter()
        .filter(|(name, _)| TerminalPalette::slot_index(name).is_some())
        .count();
    debug!("read {found} terminal slots from {}", path.display());
    Ok(parse_terminal(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn roles() -> RoleColorMap {
        [
            ("primary", Color::new(0x12, 0xab, 0xef)),
            ("onPrimary", Color::new(0xff, 0xff, 0xff)),
        ]
        .into_iter()
        .collect()
    }

    fn terminal() -> TerminalPalette {
        TerminalPalette::from_fn(|i| format!("#0000{i:02X}"))
    }

    #[test]
    fn render_starts_with_flags() {
        let out = ScssExport {
            roles: &roles(),
            terminal: &terminal(),
            dark: true,
            transparent: false,
        }
        .render()
        .unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("$darkmode: true;"));
        assert_eq!(lines.next(), Some("$transparent: false;"));
        assert_eq!(lines.next(), Some("$primary: #12ABEF;"));
        assert_eq!(lines.next(), Some("$onPrimary: #FFFFFF;"));
        assert_eq!(lines.next(), Some("$term0: #000000;"));
        assert_eq!(out.lines().last(), Some("$term15: #00000F;"));
    }

    #[test]
    fn every_line_is_a_variable() {
        let out = ScssExport {
            roles: &roles(),
            terminal: &terminal(),
            dark: false,
            transparent: true,
        }
        .render()
        .unwrap();
        assert_eq!(out.lines().count(), 2 + 2 + 16);
        for line in out.lines() {
            assert!(line.starts_with('$') && line.ends_with(';'), "{line}");
        }
    }

    #[test]
    fn parse_reads_back_terminal_slots() {
        let out = ScssExport {
            roles: &roles(),
            terminal: &terminal(),
            dark: true,
            transparent: false,
        }
        .render()
        .unwrap();
        let parsed = parse_terminal(&out);
        assert_eq!(parsed.get(0), "#000000");
        assert_eq!(parsed.get(10), "#00000a");
    }

    #[test]
    fn parse_ignores_non_color_lines() {
        let text = "$darkmode: true;\n// comment\n$term3:#AbCdEf;\n$bad name: #000000;\n$term4: #12345;\n";
        let vars = parse_variables(text);
        assert_eq!(vars, vec![("term3".to_string(), "#abcdef".to_string())]);

        let palette = parse_terminal(text);
        assert_eq!(palette.get(3), "#abcdef");
        assert_eq!(palette.get(4), "#ffffff");
    }

    #[test]
    fn read_terminal_loads_a_written_file() {
        let path = std::env::temp_dir().join(format!("wallhue-scss-{}.scss", std::process::id()));
        std::fs::write(&path, "$term1: #C0392B;\n$term15: #FAFAFA;\n").unwrap();
        let palette = read_terminal(&path).unwrap();
        assert_eq!(palette.get(1), "#c0392b");
        assert_eq!(palette.get(15), "#fafafa");
        assert_eq!(palette.get(2), "#ffffff");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn read_terminal_reports_missing_files() {
        let err = read_terminal(Path::new("/nonexistent/colors.scss")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/colors.scss"));
    }
}
