use std::collections::HashMap;

use {
    anyhow::{anyhow, bail},
    cursive::{
        theme::{
            BorderStyle,
            Color::{self, Rgb},
            ColorStyle, Palette,
            PaletteColor::{self, *},
        },
        With,
    },
};

use crate::BayouError;

const COLOR_NAMES: [&str; 9] = [
    "fg", "bg", "hl", "prompt", "title", "price", "badge", "info", "err",
];

pub fn validate_color(name: &str) -> bool {
    COLOR_NAMES.contains(&name)
}

// The color palette for the browser, keyed by the names above. `default()`
// is the full built-in palette; the file and args conversions produce
// sparse overlays that are merged over it.
#[derive(Debug)]
pub struct Theme {
    colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            colors: default_palette(),
        }
    }
}

impl Theme {
    fn sparse() -> Self {
        Theme {
            colors: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Color> {
        self.colors.get(name)
    }

    pub fn extend(&mut self, other: Theme) {
        self.colors.extend(other.colors);
    }

    // Draw everything in the terminal's own colors.
    pub fn set_term_colors(&mut self) {
        for value in self.colors.values_mut() {
            *value = Color::TerminalDefault;
        }
    }

    // Keep the palette but let the terminal background through.
    pub fn set_term_bg(&mut self) {
        self.colors.insert("bg".to_string(), Color::TerminalDefault);
    }

    pub fn to_cursive(&self) -> cursive::theme::Theme {
        let color = |name: &str| {
            self.colors
                .get(name)
                .copied()
                .unwrap_or(Color::TerminalDefault)
        };

        cursive::theme::Theme {
            shadow: false,
            borders: BorderStyle::Simple,
            palette: Palette::default().with(|palette| {
                palette[Primary] = color("hl");
                palette[Secondary] = color("fg");
                palette[Tertiary] = color("prompt");
                palette[Background] = color("bg");
                palette[View] = color("bg");
                palette[TitlePrimary] = color("title");
                palette[TitleSecondary] = color("price");
                palette[Shadow] = color("badge");
                palette[Highlight] = color("info");
                palette[HighlightInactive] = color("err");
            }),
        }
    }
}

// Sparse overlay from the config file's color map. Unknown names and
// unparseable values are skipped rather than erroring.
impl From<HashMap<String, String>> for Theme {
    fn from(map: HashMap<String, String>) -> Self {
        let mut theme = Theme::sparse();

        for (name, value) in map {
            if validate_color(&name) {
                if let Ok(color) = parse_color(&value) {
                    theme.colors.insert(name, color);
                }
            }
        }

        theme
    }
}

// Sparse overlay from the command line, e.g. 'fg=81a2be,err=cc6666'.
// Unlike the config file, bad input here is reported.
impl TryFrom<String> for Theme {
    type Error = BayouError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut theme = Theme::sparse();

        for pair in value.split(',').filter(|pair| !pair.is_empty()) {
            let (name, hex) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("Invalid color setting: '{pair}'"))?;

            if !validate_color(name) {
                bail!("Unknown color name: '{name}'");
            }

            theme.colors.insert(name.to_string(), parse_color(hex)?);
        }

        Ok(theme)
    }
}

// The styles the views draw with, resolved through the active palette.
pub struct ColorStyles;

impl ColorStyles {
    pub fn fg() -> ColorStyle {
        ColorStyle::front(PaletteColor::Secondary)
    }

    pub fn hl() -> ColorStyle {
        ColorStyle::front(PaletteColor::Primary)
    }

    pub fn prompt() -> ColorStyle {
        ColorStyle::front(PaletteColor::Tertiary)
    }

    pub fn title() -> ColorStyle {
        ColorStyle::front(PaletteColor::TitlePrimary)
    }

    pub fn price() -> ColorStyle {
        ColorStyle::front(PaletteColor::TitleSecondary)
    }

    pub fn badge() -> ColorStyle {
        ColorStyle::front(PaletteColor::Shadow)
    }

    pub fn info() -> ColorStyle {
        ColorStyle::front(PaletteColor::Highlight)
    }

    pub fn err() -> ColorStyle {
        ColorStyle::front(PaletteColor::HighlightInactive)
    }
}

fn parse_color(value: &str) -> Result<Color, BayouError> {
    let hex = value.trim().trim_start_matches('#');

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid hex color: '{value}'");
    }

    let channel = |range| u8::from_str_radix(&hex[range], 16).expect("checked hex digits");

    Ok(Rgb(channel(0..2), channel(2..4), channel(4..6)))
}

fn default_palette() -> HashMap<String, Color> {
    let mut m = HashMap::new();
    m.insert("fg".into(), Rgb(197, 200, 198)); // white #c5c8c6
    m.insert("bg".into(), Rgb(27, 30, 27)); // black #1b1e1b
    m.insert("hl".into(), Rgb(240, 198, 116)); // yellow #f0c674
    m.insert("prompt".into(), Rgb(112, 120, 112)); // grey #707870
    m.insert("title".into(), Rgb(181, 189, 104)); // green #b5bd68
    m.insert("price".into(), Rgb(138, 190, 183)); // cyan #8abeb7
    m.insert("badge".into(), Rgb(129, 162, 190)); // blue #81a2be
    m.insert("info".into(), Rgb(178, 148, 187)); // magenta #b294bb
    m.insert("err".into(), Rgb(204, 102, 102)); // red #cc6666
    m
}
