//! Conversion of CSS color strings into `genpdf` colors.

use genpdf::style::Color;
use log::warn;

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("purple", (128, 0, 128)),
    ("rebeccapurple", (102, 51, 153)),
    ("orange", (255, 165, 0)),
    ("maroon", (128, 0, 0)),
    ("olive", (128, 128, 0)),
];

/// Parses `#rgb`, `#rrggbb` or a basic CSS color name.
pub fn parse_css_color(value: &str) -> Option<Color> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            3 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
                Some(Color::Rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        };
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, (r, g, b))| Color::Rgb(*r, *g, *b))
}

/// Parses `value`, falling back to `fallback` (and logging) when it is not understood.
pub fn resolve_color(value: &str, fallback: Color) -> Color {
    parse_css_color(value).unwrap_or_else(|| {
        warn!("Unsupported color '{}'; using the page text color.", value);
        fallback
    })
}
