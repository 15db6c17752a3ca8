//! Color table and color entry parsing
//!
//! A color entry in a sprite document is either a channel table
//! (`{ red = 255, green = 0, blue = 0, alpha = 0.5 }`) or a CSS color string:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hwb()`, ...
//! - Named: `red`, `blue`, `transparent`, etc.
//!
//! All channels are stored as `u8`. Red, green and blue are integers in
//! 0-255. Alpha is read on two scales: an integer alpha is 0-255, a
//! floating-point alpha is 0.0-1.0 and is multiplied by 255 and rounded.

use std::collections::BTreeMap;

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde_json::Value;
use thiserror::Error;

/// Fully opaque alpha.
pub const OPAQUE: u8 = 255;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
    /// A required channel is absent from a channel table
    #[error("missing '{0}' channel")]
    MissingChannel(&'static str),
    /// A channel is not a number in its allowed range
    #[error("'{channel}' must be {expected}, got {value}")]
    InvalidChannel { channel: &'static str, expected: &'static str, value: String },
    /// The entry is neither a table nor a string
    #[error("color must be a table of channels or a color string, got {0}")]
    InvalidEntry(String),
}

/// Mapping from a pixel character to its color.
///
/// Stored sorted by character so serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: BTreeMap<char, Rgba<u8>>,
}

impl ColorTable {
    /// Create an empty color table.
    pub fn new() -> Self {
        Self { colors: BTreeMap::new() }
    }

    /// Insert or replace the color for a character.
    pub fn insert(&mut self, key: char, color: Rgba<u8>) -> Option<Rgba<u8>> {
        self.colors.insert(key, color)
    }

    /// Look up the color for a character.
    pub fn get(&self, key: char) -> Option<Rgba<u8>> {
        self.colors.get(&key).copied()
    }

    /// Check whether a character has a color.
    pub fn contains(&self, key: char) -> bool {
        self.colors.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate entries in character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Rgba<u8>)> + '_ {
        self.colors.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(char, Rgba<u8>)> for ColorTable {
    fn from_iter<I: IntoIterator<Item = (char, Rgba<u8>)>>(iter: I) -> Self {
        Self { colors: iter.into_iter().collect() }
    }
}

/// Parse one color entry from a generic document value.
///
/// A table takes integer `red`, `green` and `blue` in 0-255. Its `alpha`
/// scale depends on the number type: an integer is a byte in 0-255, a
/// float is a fraction in 0.0-1.0. So `alpha = 1` is almost fully
/// transparent while `alpha = 1.0` is opaque. A missing alpha is opaque.
///
/// # Examples
///
/// ```
/// use spritedef::color::parse_color_entry;
///
/// let entry = serde_json::json!({"red": 255, "green": 0, "blue": 0, "alpha": 0.5});
/// assert_eq!(parse_color_entry(&entry).unwrap(), image::Rgba([255, 0, 0, 128]));
///
/// let entry = serde_json::json!("#00FF00");
/// assert_eq!(parse_color_entry(&entry).unwrap(), image::Rgba([0, 255, 0, 255]));
/// ```
pub fn parse_color_entry(value: &Value) -> Result<Rgba<u8>, ColorError> {
    match value {
        Value::String(s) => parse_color(s),
        Value::Object(channels) => {
            let red = parse_rgb_channel("red", channels.get("red"))?;
            let green = parse_rgb_channel("green", channels.get("green"))?;
            let blue = parse_rgb_channel("blue", channels.get("blue"))?;
            let alpha = match channels.get("alpha") {
                None => OPAQUE,
                Some(v) => parse_alpha(v)?,
            };
            Ok(Rgba([red, green, blue, alpha]))
        }
        other => Err(ColorError::InvalidEntry(other.to_string())),
    }
}

fn parse_rgb_channel(channel: &'static str, value: Option<&Value>) -> Result<u8, ColorError> {
    let value = value.ok_or(ColorError::MissingChannel(channel))?;
    value
        .as_u64()
        .filter(|v| *v <= 255)
        .map(|v| v as u8)
        .ok_or_else(|| ColorError::InvalidChannel {
            channel,
            expected: "an integer in 0-255",
            value: value.to_string(),
        })
}

/// Read alpha: integers on the 0-255 scale, floats on the 0.0-1.0 scale.
fn parse_alpha(value: &Value) -> Result<u8, ColorError> {
    if let Some(a) = value.as_u64() {
        if a <= 255 {
            return Ok(a as u8);
        }
    } else if let Some(a) = value.as_f64() {
        if (0.0..=1.0).contains(&a) {
            return Ok((a * 255.0).round() as u8);
        }
    }
    Err(ColorError::InvalidChannel {
        channel: "alpha",
        expected: "an integer in 0-255 or a fraction in 0.0-1.0",
        value: value.to_string(),
    })
}

/// Parse a CSS color string into an RGBA color.
///
/// # Examples
///
/// ```
/// use spritedef::color::parse_color;
///
/// let red = parse_color("#F00").unwrap();
/// assert_eq!(red, image::Rgba([255, 0, 0, 255]));
///
/// let blue = parse_color("blue").unwrap();
/// assert_eq!(blue, image::Rgba([0, 0, 255, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, OPAQUE])),
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r2, g1, g2, b1, b2] => Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, OPAQUE])),
        [r1, r2, g1, g2, b1, b2, a1, a2] => {
            Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, a1 * 16 + a2]))
        }
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

fn css_color_to_rgba(color: CssColor) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let r = (rgb.r * 255.0).round() as u8;
                let g = (rgb.g * 255.0).round() as u8;
                let b = (rgb.b * 255.0).round() as u8;
                let a = (rgb.alpha * 255.0).round() as u8;
                Ok(Rgba([r, g, b, a]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

/// Format a color as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
pub fn format_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == OPAQUE {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_table_defaults_to_opaque() {
        let color = parse_color_entry(&json!({"red": 10, "green": 20, "blue": 30})).unwrap();
        assert_eq!(color, Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_fractional_alpha_scales_to_255() {
        let half = parse_color_entry(&json!({"red": 0, "green": 0, "blue": 0, "alpha": 0.5}));
        assert_eq!(half.unwrap(), Rgba([0, 0, 0, 128]));

        let full = parse_color_entry(&json!({"red": 0, "green": 0, "blue": 0, "alpha": 1.0}));
        assert_eq!(full.unwrap().0[3], 255);

        let clear = parse_color_entry(&json!({"red": 0, "green": 0, "blue": 0, "alpha": 0.0}));
        assert_eq!(clear.unwrap().0[3], 0);
    }

    #[test]
    fn test_integer_alpha_is_byte_scale() {
        let color = parse_color_entry(&json!({"red": 0, "green": 0, "blue": 0, "alpha": 64}));
        assert_eq!(color.unwrap().0[3], 64);
    }

    #[test]
    fn test_integer_one_is_not_opaque() {
        let byte = parse_color_entry(&json!({"red": 0, "green": 0, "blue": 0, "alpha": 1}));
        assert_eq!(byte.unwrap(), Rgba([0, 0, 0, 1]));

        let table: Value = toml::from_str("red = 0\ngreen = 0\nblue = 0\nalpha = 1\n").unwrap();
        assert_eq!(parse_color_entry(&table).unwrap().0[3], 1);

        let table: Value = toml::from_str("red = 0\ngreen = 0\nblue = 0\nalpha = 1.0\n").unwrap();
        assert_eq!(parse_color_entry(&table).unwrap().0[3], 255);
    }

    #[test]
    fn test_alpha_out_of_range() {
        let err = parse_color_entry(&json!({"red": 0, "green": 0, "blue": 0, "alpha": 1.5}));
        assert!(matches!(err, Err(ColorError::InvalidChannel { channel: "alpha", .. })));

        let err = parse_color_entry(&json!({"red": 0, "green": 0, "blue": 0, "alpha": 300}));
        assert!(matches!(err, Err(ColorError::InvalidChannel { channel: "alpha", .. })));
    }

    #[test]
    fn test_rgb_channel_validation() {
        let err = parse_color_entry(&json!({"red": 256, "green": 0, "blue": 0}));
        assert!(matches!(err, Err(ColorError::InvalidChannel { channel: "red", .. })));

        let err = parse_color_entry(&json!({"red": -1, "green": 0, "blue": 0}));
        assert!(matches!(err, Err(ColorError::InvalidChannel { channel: "red", .. })));

        let err = parse_color_entry(&json!({"red": 0.5, "green": 0, "blue": 0}));
        assert!(matches!(err, Err(ColorError::InvalidChannel { channel: "red", .. })));

        let err = parse_color_entry(&json!({"red": 0, "blue": 0}));
        assert_eq!(err, Err(ColorError::MissingChannel("green")));
    }

    #[test]
    fn test_entry_must_be_table_or_string() {
        assert!(matches!(parse_color_entry(&json!(42)), Err(ColorError::InvalidEntry(_))));
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_color("#F00").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("#F008").unwrap(), Rgba([255, 0, 0, 136]));
        assert_eq!(parse_color("#00ff00").unwrap(), Rgba([0, 255, 0, 255]));
        assert_eq!(parse_color("#0000FF80").unwrap(), Rgba([0, 0, 255, 128]));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#GG0000"), Err(ColorError::InvalidHex('G')));
        assert_eq!(parse_color(""), Err(ColorError::Empty));
    }

    #[test]
    fn test_css_functional_and_named() {
        assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), Rgba([0, 255, 0, 255]));
        assert_eq!(parse_color("white").unwrap(), Rgba([255, 255, 255, 255]));
        assert!(parse_color("notacolor").is_err());
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(Rgba([255, 0, 16, 255])), "#FF0010");
        assert_eq!(format_hex(Rgba([255, 0, 16, 128])), "#FF001080");
    }

    #[test]
    fn test_color_table_is_sorted() {
        let table: ColorTable =
            [('b', Rgba([0, 0, 0, 255])), ('a', Rgba([1, 1, 1, 255]))].into_iter().collect();
        let keys: Vec<char> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!['a', 'b']);
        assert!(table.contains('a'));
        assert_eq!(table.get('z'), None);
    }
}
