//! RGB color values and the mouse's inverse-color wire encoding.
//!
//! The firmware expects `255 - channel` for each of red, green and blue.
//! For a `u8` that is exactly bitwise NOT, which is its own inverse.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xFF);
    pub const GREEN: Rgb = Rgb::new(0x00, 0xFF, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as the device expects them: `[255 - r, 255 - g, 255 - b]`.
    pub fn inverted(self) -> [u8; 3] {
        [!self.r, !self.g, !self.b]
    }

    /// Recover a color from its wire bytes.
    pub fn from_inverted(bytes: [u8; 3]) -> Self {
        Self::new(!bytes[0], !bytes[1], !bytes[2])
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (case-insensitive).
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::parse("color", input, "expected hex digits"));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|e| Error::parse("color", input, e.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            // #rgb expands each nibble: #0f0 == #00ff00
            3 => Ok(Self::new(
                channel(&digits[0..1])? * 0x11,
                channel(&digits[1..2])? * 0x11,
                channel(&digits[2..3])? * 0x11,
            )),
            n => Err(Error::parse(
                "color",
                input,
                format!("expected 3 or 6 hex digits, got {n}"),
            )),
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn green_inverts_to_magenta_bytes() {
        assert_eq!(Rgb::GREEN.inverted(), [255, 0, 255]);
    }

    #[test]
    fn inversion_matches_subtraction() {
        let c = Rgb::new(0x12, 0x80, 0xFE);
        assert_eq!(c.inverted(), [255 - 0x12, 255 - 0x80, 255 - 0xFE]);
        assert_eq!(Rgb::from_inverted(c.inverted()), c);
    }

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#0000ff").unwrap(), Rgb::BLUE);
        assert_eq!(Rgb::from_hex("00FF00").unwrap(), Rgb::GREEN);
        assert_eq!(Rgb::from_hex("#f80").unwrap(), Rgb::new(0xFF, 0x88, 0x00));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("#+1+2+3").is_err());
        assert!(Rgb::from_hex("##00ff00").is_err());
        assert!(Rgb::from_hex("#").is_err());
        assert!(matches!(
            Rgb::from_hex("blue"),
            Err(Error::Parse { field: "color", .. })
        ));
    }

    #[test]
    fn hex_string_serialization() {
        let json = serde_json::to_string(&Rgb::new(0xAB, 0xCD, 0xEF)).unwrap();
        assert_eq!(json, "\"#abcdef\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::new(0xAB, 0xCD, 0xEF));
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}
