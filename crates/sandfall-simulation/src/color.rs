//! Display color parsing
//!
//! Colors are either `#RRGGBB` hex strings or names from a fixed table.

use crate::error::ConfigError;

/// RGBA color, alpha is always opaque for parsed colors
pub type Rgba = [u8; 4];

/// Color used when a definition does not name one
pub const DEFAULT_COLOR: &str = "white";

const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("gray", [100, 100, 100, 255]),
    ("grey", [100, 100, 100, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 255, 0, 255]),
    ("deepblue", [0, 0, 255, 255]),
    ("blue", [0, 196, 255, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("sun", [255, 194, 0, 255]),
    ("orange", [255, 109, 0, 255]),
    ("rose", [255, 0, 127, 255]),
    ("lavender", [255, 0, 220, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("sakura", [255, 171, 255, 255]),
    ("hotpink", [255, 68, 178, 255]),
    ("pink", [255, 141, 212, 255]),
    ("purpur", [157, 110, 253, 255]),
    ("purple", [106, 69, 178, 255]),
    ("lime", [106, 255, 178, 255]),
    ("brown", [106, 69, 0, 255]),
];

/// Parse a color name or `#RRGGBB` string
pub fn parse_color(s: &str) -> Result<Rgba, ConfigError> {
    if s.is_empty() {
        return Err(ConfigError::EmptyColor);
    }

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    named_color(s).ok_or_else(|| ConfigError::UnknownColorName(s.to_string()))
}

/// Look up a color in the built-in name table
pub fn named_color(name: &str) -> Option<Rgba> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rgba)| *rgba)
}

fn parse_hex_color(s: &str) -> Result<Rgba, ConfigError> {
    let invalid = || ConfigError::InvalidHexColor(s.to_string());

    // Byte length check also rejects multi-byte characters before slicing
    if s.len() != 7 || !s[1..].bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&s[range], 16);
    match (channel(1..3), channel(3..5), channel(5..7)) {
        (Ok(r), Ok(g), Ok(b)) => Ok([r, g, b, 255]),
        _ => Err(invalid()),
    }
}
