//! Zed editor theme family (one dark and one light theme) built from the UI
//! colors and the terminal palette.
//!
//! The light theme is derived from the dark one by rescaling HSL lightness per
//! key category. That is a plain RGB-space transform and unrelated to HCT
//! tone.

use anyhow::{Context, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::color::Color;
use crate::terminal::TerminalPalette;

use super::ui_json::UiColors;
use super::Exporter;

pub const SCHEMA_URL: &str = "https://zed.dev/schema/themes/v0.2.0.json";
const FAMILY_NAME: &str = "Wallhue Material";
const AUTHOR: &str = "wallhue";

const OPAQUE: u8 = 0xff;
const TRANSPARENT: &str = "#00000000";
const WHITE: Color = Color::new(0xff, 0xff, 0xff);

/// Lightness factors of the light theme.
const LIGHT_BACKGROUND: f32 = 3.5;
const LIGHT_FOREGROUND: f32 = 0.3;
const LIGHT_BASE: f32 = 2.5;
const LIGHT_SURFACE: f32 = 2.3;
const LIGHT_ELEVATED: f32 = 2.0;

/// Keys darkened in the light theme besides those containing "foreground".
const FOREGROUND_KEYS: [&str; 4] = ["text", "icon", "editor.foreground", "terminal.foreground"];

/// ANSI color name and the terminal slot it reads; bright and dim variants
/// are lightness-rescaled.
const ANSI_COLORS: [(&str, usize); 21] = [
    ("red", 1),
    ("bright_red", 9),
    ("dim_red", 1),
    ("green", 2),
    ("bright_green", 10),
    ("dim_green", 2),
    ("yellow", 3),
    ("bright_yellow", 11),
    ("dim_yellow", 3),
    ("blue", 4),
    ("bright_blue", 12),
    ("dim_blue", 4),
    ("magenta", 5),
    ("bright_magenta", 13),
    ("dim_magenta", 5),
    ("cyan", 6),
    ("bright_cyan", 14),
    ("dim_cyan", 6),
    ("white", 7),
    ("bright_white", 15),
    ("dim_white", 7),
];
const BRIGHT: f32 = 1.2;
const DIM: f32 = 0.7;

/// Theme colors read from the UI color set, with fallbacks for missing keys.
struct Base {
    primary: Color,
    secondary: Color,
    tertiary: Color,
    error: Color,
    surface: Color,
    surface_low: Color,
    surface_std: Color,
    surface_high: Color,
    outline: Color,
    on_surface: Color,
    on_surface_variant: Color,
}

fn pick(ui: &UiColors, key: &str, fallback: Color) -> Color {
    ui.get(key)
        .and_then(|v| Color::from_hex(v).ok())
        .unwrap_or(fallback)
}

impl Base {
    fn from_ui(ui: &UiColors) -> Self {
        Self {
            primary: pick(ui, "primary", Color::new(0x7a, 0xa2, 0xf7)),
            secondary: pick(ui, "secondary", Color::new(0xbb, 0x9a, 0xf7)),
            tertiary: pick(ui, "tertiary", Color::new(0x9e, 0xce, 0x6a)),
            error: pick(ui, "error", Color::new(0xf7, 0x76, 0x8e)),
            surface: pick(ui, "surface", Color::new(0x1a, 0x1b, 0x26)),
            surface_low: pick(ui, "surface_container_low", Color::new(0x24, 0x28, 0x3b)),
            surface_std: pick(ui, "surface_container", Color::new(0x41, 0x48, 0x68)),
            surface_high: pick(ui, "surface_container_high", Color::new(0x56, 0x5f, 0x89)),
            outline: pick(ui, "outline", Color::new(0x56, 0x5f, 0x89)),
            on_surface: pick(ui, "on_surface", Color::new(0xc0, 0xca, 0xf5)),
            on_surface_variant: pick(ui, "on_surface_variant", Color::new(0x9a, 0xa5, 0xce)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub cursor: String,
    pub background: String,
    pub selection: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub color: String,
    pub font_style: Option<&'static str>,
    pub font_weight: Option<u16>,
}

impl Highlight {
    fn plain(color: Color) -> Self {
        Self {
            color: color.to_hex_alpha(OPAQUE),
            font_style: None,
            font_weight: None,
        }
    }
}

/// One value of a theme's `style` map.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Color(String),
    Null,
    Players(Vec<Player>),
    Syntax(Vec<(&'static str, Highlight)>),
}

impl Serialize for StyleValue {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            StyleValue::Color(hex) => ser.serialize_str(hex),
            StyleValue::Null => ser.serialize_none(),
            StyleValue::Players(players) => players.serialize(ser),
            StyleValue::Syntax(tokens) => {
                let mut map = ser.serialize_map(Some(tokens.len()))?;
                for (token, highlight) in tokens {
                    map.serialize_entry(token, highlight)?;
                }
                map.end()
            }
        }
    }
}

/// Flat, ordered `style` map of one theme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: Vec<(String, StyleValue)>,
}

impl Style {
    /// Insert or replace `key`, keeping its original position on replace.
    pub fn set(&mut self, key: &str, value: StyleValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    fn solid(&mut self, key: &str, color: Color) {
        self.alpha(key, color, OPAQUE);
    }

    fn alpha(&mut self, key: &str, color: Color, alpha: u8) {
        self.set(key, StyleValue::Color(color.to_hex_alpha(alpha)));
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The color string at `key`, if it holds one.
    pub fn color(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(StyleValue::Color(hex)) => Some(hex),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for Style {
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

/// Rescale the lightness of a `#rrggbb` or `#rrggbbaa` string, keeping any
/// alpha suffix. Anything else is returned unchanged.
fn rescale(value: &str, factor: f32) -> String {
    let (Some(rgb), Some(alpha)) = (value.get(..7), value.get(7..)) else {
        return value.to_string();
    };
    match Color::from_hex(rgb) {
        Ok(color) => format!("{}{}", color.adjust_lightness(factor).to_hex(), alpha),
        Err(_) => value.to_string(),
    }
}

pub fn dark_style(ui: &UiColors, terminal: &TerminalPalette) -> Style {
    let b = Base::from_ui(ui);
    let l = |c: Color, factor: f32| c.adjust_lightness(factor);
    let transparent = || StyleValue::Color(TRANSPARENT.to_string());
    let mut s = Style::default();

    s.solid("border", b.outline);
    s.solid("border.variant", l(b.surface_low, 0.8));
    s.solid("border.focused", b.primary);
    s.solid("border.selected", l(b.primary, 0.7));
    s.set("border.transparent", transparent());
    s.solid("border.disabled", l(b.outline, 0.5));
    s.solid("elevated_surface.background", b.surface_low);
    s.solid("surface.background", b.surface_low);
    s.solid("background", b.surface);
    s.solid("element.background", b.surface_low);
    s.solid("element.hover", b.surface_std);
    s.solid("element.active", b.surface_high);
    s.solid("element.selected", b.surface_high);
    s.solid("element.disabled", b.surface_low);
    s.alpha("drop_target.background", b.primary, 0x80);
    s.set("ghost_element.background", transparent());
    s.solid("ghost_element.hover", b.surface_std);
    s.solid("ghost_element.active", b.surface_high);
    s.solid("ghost_element.selected", b.surface_high);
    s.solid("ghost_element.disabled", b.surface_low);
    s.solid("text", b.on_surface);
    s.solid("text.muted", b.on_surface_variant);
    s.solid("text.placeholder", l(b.on_surface_variant, 0.7));
    s.solid("text.disabled", l(b.on_surface_variant, 0.6));
    s.solid("text.accent", b.primary);
    s.solid("icon", b.on_surface);
    s.solid("icon.muted", b.on_surface_variant);
    s.solid("icon.disabled", l(b.on_surface_variant, 0.6));
    s.solid("icon.placeholder", b.on_surface_variant);
    s.solid("icon.accent", b.primary);
    s.solid("status_bar.background", b.surface);
    s.solid("title_bar.background", b.surface);
    s.solid("title_bar.inactive_background", b.surface_low);
    s.solid("toolbar.background", b.surface_low);
    s.solid("tab_bar.background", b.surface_low);
    s.solid("tab.inactive_background", b.surface_low);
    s.solid("tab.active_background", l(b.surface, 0.9));
    s.alpha("search.match_background", b.primary, 0x66);
    s.alpha("search.active_match_background", b.tertiary, 0x66);
    s.solid("panel.background", b.surface_low);
    s.set("panel.focused_border", StyleValue::Null);
    s.set("pane.focused_border", StyleValue::Null);
    s.alpha("scrollbar.thumb.background", b.on_surface_variant, 0x4c);
    s.solid("scrollbar.thumb.hover_background", b.surface_high);
    s.solid("scrollbar.thumb.border", b.surface_std);
    s.set("scrollbar.track.background", transparent());
    s.solid("scrollbar.track.border", b.surface_std);
    s.solid("editor.foreground", b.on_surface);
    s.solid("editor.background", b.surface);
    s.solid("editor.gutter.background", b.surface);
    s.solid("editor.subheader.background", b.surface_low);
    s.alpha("editor.active_line.background", b.surface_low, 0xbf);
    s.solid("editor.highlighted_line.background", b.surface_std);
    s.solid("editor.line_number", b.on_surface_variant);
    s.solid("editor.active_line_number", b.on_surface);
    s.solid("editor.hover_line_number", l(b.on_surface, 1.1));
    s.solid("editor.invisible", b.on_surface_variant);
    s.alpha("editor.wrap_guide", b.on_surface_variant, 0x0d);
    s.alpha("editor.active_wrap_guide", b.on_surface_variant, 0x1a);
    s.alpha("editor.document_highlight.read_background", b.primary, 0x1a);
    s.alpha("editor.document_highlight.write_background", b.surface_std, 0x66);

    let term = |i: usize| terminal.color(i).unwrap_or(WHITE);
    s.solid("terminal.background", b.surface);
    s.solid("terminal.foreground", b.on_surface);
    s.solid("terminal.bright_foreground", b.on_surface);
    s.solid("terminal.dim_foreground", l(b.on_surface, 0.6));
    s.solid("terminal.ansi.black", term(0));
    s.solid("terminal.ansi.bright_black", term(8));
    s.solid("terminal.ansi.dim_black", l(term(0), 0.6));
    for (name, slot) in ANSI_COLORS {
        let base = term(slot);
        let color = if name.starts_with("bright") {
            l(base, BRIGHT)
        } else if name.starts_with("dim") {
            l(base, DIM)
        } else {
            base
        };
        s.solid(&format!("terminal.ansi.{name}"), color);
    }

    s.solid("link_text.hover", b.primary);

    s.solid("version_control.added", b.tertiary);
    s.solid("version_control.modified", l(b.primary, 0.8));
    s.alpha("version_control.word_added", b.tertiary, 0x59);
    s.alpha("version_control.word_deleted", b.error, 0xcc);
    s.solid("version_control.deleted", b.error);
    s.alpha("version_control.conflict_marker.ours", b.tertiary, 0x1a);
    s.alpha("version_control.conflict_marker.theirs", b.primary, 0x1a);

    let hint = l(b.primary, 0.7);
    let modified = l(b.primary, 0.8);
    let predictive = l(b.secondary, 0.8);
    let warning = l(b.tertiary, 0.9);

    // (name, color, background color, border color)
    let statuses = [
        ("conflict", l(b.tertiary, 0.8), l(b.tertiary, 0.8), l(b.tertiary, 0.6)),
        ("created", b.tertiary, b.tertiary, l(b.tertiary, 0.6)),
        ("deleted", b.error, b.error, l(b.error, 0.6)),
        ("error", b.error, b.error, l(b.error, 0.6)),
        ("hidden", b.on_surface_variant, l(b.on_surface_variant, 0.3), b.outline),
        ("hint", hint, hint, l(b.primary, 0.6)),
        ("ignored", b.on_surface_variant, l(b.on_surface_variant, 0.3), b.outline),
        ("info", b.primary, b.primary, l(b.primary, 0.6)),
        ("modified", modified, modified, l(modified, 0.6)),
        ("predictive", predictive, predictive, l(predictive, 0.6)),
        ("renamed", b.primary, b.primary, l(b.primary, 0.6)),
        ("success", b.tertiary, b.tertiary, l(b.tertiary, 0.6)),
        ("unreachable", b.on_surface_variant, l(b.on_surface_variant, 0.3), b.outline),
        ("warning", warning, warning, l(warning, 0.6)),
    ];
    for (name, color, background, border) in statuses {
        s.solid(name, color);
        s.alpha(&format!("{name}.background"), background, 0x1a);
        s.solid(&format!("{name}.border"), border);
    }

    let players = [
        b.primary,
        b.error,
        l(b.tertiary, 0.8),
        b.secondary,
        l(b.secondary, 1.2),
        l(b.error, 0.8),
        l(b.tertiary, 0.9),
        l(b.primary, 0.8),
    ];
    s.set(
        "players",
        StyleValue::Players(
            players
                .into_iter()
                .map(|c| Player {
                    cursor: c.to_hex_alpha(OPAQUE),
                    background: c.to_hex_alpha(OPAQUE),
                    selection: c.to_hex_alpha(0x3d),
                })
                .collect(),
        ),
    );

    s.set("syntax", StyleValue::Syntax(syntax(&b, hint, predictive)));
    s
}

fn syntax(b: &Base, hint: Color, predictive: Color) -> Vec<(&'static str, Highlight)> {
    let l = |c: Color, factor: f32| c.adjust_lightness(factor);
    let h = Highlight::plain;
    let styled = |c: Color, font_style: Option<&'static str>, font_weight: Option<u16>| Highlight {
        font_style,
        font_weight,
        ..Highlight::plain(c)
    };

    vec![
        ("attribute", h(b.primary)),
        ("boolean", h(l(b.tertiary, 0.8))),
        ("comment", h(l(b.on_surface_variant, 0.7))),
        ("comment.doc", h(l(b.on_surface_variant, 0.8))),
        ("constant", h(l(b.tertiary, 0.9))),
        ("constructor", h(b.primary)),
        ("embedded", h(b.on_surface)),
        ("emphasis", h(b.primary)),
        ("emphasis.strong", styled(l(b.tertiary, 0.8), None, Some(700))),
        ("enum", h(b.secondary)),
        ("function", h(b.primary)),
        ("hint", h(hint)),
        ("keyword", h(b.secondary)),
        ("label", h(b.primary)),
        ("link_text", styled(b.primary, Some("normal"), None)),
        ("link_uri", h(b.secondary)),
        ("namespace", h(b.on_surface)),
        ("number", h(l(b.tertiary, 0.8))),
        ("operator", h(b.secondary)),
        ("predictive", styled(predictive, Some("italic"), None)),
        ("preproc", h(b.on_surface)),
        ("primary", h(b.on_surface)),
        ("property", h(l(b.primary, 0.85))),
        ("punctuation", h(b.on_surface)),
        ("punctuation.bracket", h(l(b.on_surface, 0.9))),
        ("punctuation.delimiter", h(l(b.on_surface, 0.9))),
        ("punctuation.list_marker", h(l(b.primary, 0.85))),
        ("punctuation.markup", h(l(b.primary, 0.85))),
        ("punctuation.special", h(l(b.error, 0.8))),
        ("selector", h(l(b.tertiary, 0.9))),
        ("selector.pseudo", h(b.primary)),
        ("string", h(b.tertiary)),
        ("string.escape", h(l(b.on_surface_variant, 0.8))),
        ("string.regex", h(l(b.tertiary, 0.8))),
        ("string.special", h(l(b.tertiary, 0.8))),
        ("string.special.symbol", h(l(b.tertiary, 0.8))),
        ("tag", h(b.primary)),
        ("text.literal", h(b.tertiary)),
        ("title", styled(l(b.primary, 0.85), None, Some(400))),
        ("type", h(b.secondary)),
        ("variable", h(b.on_surface)),
        ("variable.special", h(l(b.tertiary, 0.8))),
        ("variant", h(b.primary)),
    ]
}

/// The dark style with backgrounds pushed light and foregrounds dark.
pub fn light_style(ui: &UiColors, terminal: &TerminalPalette) -> Style {
    let dark = dark_style(ui, terminal);
    let mut light = Style {
        entries: dark
            .entries
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    StyleValue::Color(hex) => {
                        let lower = key.to_ascii_lowercase();
                        let factor = if lower.contains("background") {
                            Some(LIGHT_BACKGROUND)
                        } else if lower.contains("foreground")
                            || FOREGROUND_KEYS.contains(&key.as_str())
                        {
                            Some(LIGHT_FOREGROUND)
                        } else {
                            None
                        };
                        match factor {
                            Some(factor) => StyleValue::Color(rescale(&hex, factor)),
                            None => StyleValue::Color(hex),
                        }
                    }
                    other => other,
                };
                (key, value)
            })
            .collect(),
    };

    let surface = pick(ui, "surface", WHITE);
    let surface_low = pick(ui, "surface_container_low", Color::new(0xf0, 0xf0, 0xf0));
    for key in ["background", "editor.background", "editor.gutter.background", "terminal.background"] {
        light.solid(key, surface.adjust_lightness(LIGHT_BASE));
    }
    light.solid("surface.background", surface.adjust_lightness(LIGHT_SURFACE));
    light.solid("elevated_surface.background", surface_low.adjust_lightness(LIGHT_ELEVATED));
    light.solid("element.background", surface_low.adjust_lightness(LIGHT_ELEVATED));

    for key in ["text", "editor.foreground", "terminal.foreground"] {
        if let Some(hex) = light.color(key) {
            let darker = rescale(hex, LIGHT_FOREGROUND);
            light.set(key, StyleValue::Color(darker));
        }
    }
    light
}

#[derive(Serialize)]
struct ThemeDocument<'a> {
    #[serde(rename = "$schema")]
    schema: &'a str,
    name: &'a str,
    author: &'a str,
    themes: Vec<ThemeEntry<'a>>,
}

#[derive(Serialize)]
struct ThemeEntry<'a> {
    name: &'a str,
    appearance: &'a str,
    style: Style,
}

/// Zed theme family JSON.
pub struct ZedExport<'a> {
    pub ui: &'a UiColors,
    pub terminal: &'a TerminalPalette,
}

impl Exporter for ZedExport<'_> {
    fn name(&self) -> &str {
        "Zed theme"
    }

    fn render(&self) -> Result<String> {
        let dark_name = format!("{FAMILY_NAME} Dark");
        let light_name = format!("{FAMILY_NAME} Light");
        let document = ThemeDocument {
            schema: SCHEMA_URL,
            name: FAMILY_NAME,
            author: AUTHOR,
            themes: vec![
                ThemeEntry {
                    name: &dark_name,
                    appearance: "dark",
                    style: dark_style(self.ui, self.terminal),
                },
                ThemeEntry {
                    name: &light_name,
                    appearance: "light",
                    style: light_style(self.ui, self.terminal),
                },
            ],
        };
        serde_json::to_string_pretty(&document).context("failed to serialize Zed theme")
    }
}
