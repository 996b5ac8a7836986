//! Hex color parsing and random gray generation.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use rand::Rng;

/// Darkest channel value a generated gray may take.
pub const GRAY_MIN: u8 = 0x10;
/// Lightest channel value a generated gray may take. Kept dark so the light
/// page text stays readable on top of it.
pub const GRAY_MAX: u8 = 0x60;

fn channel(hex: &str) -> Option<u8> {
    match u8::from_str_radix(hex, 16) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2))?;
            let g = channel(&hex[1..2].repeat(2))?;
            let b = channel(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Whether `raw` is a color `parse_hex_rgb` accepts.
pub fn is_hex_color(raw: &str) -> bool {
    parse_hex_rgb(raw).is_some()
}

/// Whether `raw` parses to a color with equal channels.
pub fn is_gray(raw: &str) -> bool {
    parse_hex_rgb(raw).is_some_and(|(r, g, b)| r == g && g == b)
}

/// Format a single channel as a `#rrggbb` gray.
pub fn gray_hex(level: u8) -> String {
    format!("#{level:02x}{level:02x}{level:02x}")
}

/// Pick a random gray in `GRAY_MIN..=GRAY_MAX`.
pub fn random_gray<R: Rng + ?Sized>(rng: &mut R) -> String {
    gray_hex(rng.random_range(GRAY_MIN..=GRAY_MAX))
}
