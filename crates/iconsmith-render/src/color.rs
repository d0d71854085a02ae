//! Opaque 8-bit RGB colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// An opaque color with 8-bit channels.
///
/// Serializes as a lowercase `#rrggbb` string so it reads naturally in
/// configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex string such as `"#3498db"`, `"3498db"` or `"#fff"`.
    pub fn from_hex(hex: &str) -> RenderResult<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RenderError::invalid_color(hex));
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| RenderError::invalid_color(hex));

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            // #rgb shorthand: each digit is doubled
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(RenderError::invalid_color(hex)),
        }
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The color as an `image` pixel.
    #[inline]
    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }

    /// Blend `src` over `self` with 8-bit coverage.
    #[inline]
    pub fn blend(self, src: Self, alpha: u8) -> Self {
        let mix = |dst: u8, src: u8| -> u8 {
            let a = alpha as u32;
            ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8
        };
        Self::new(mix(self.r, src.r), mix(self.g, src.g), mix(self.b, src.b))
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_form() {
        assert_eq!(Rgb::from_hex("#3498db").unwrap(), Rgb::new(0x34, 0x98, 0xdb));
        assert_eq!(Rgb::from_hex("6366F1").unwrap(), Rgb::new(0x63, 0x66, 0xf1));
    }

    #[test]
    fn parses_shorthand() {
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("#a0c").unwrap(), Rgb::new(0xaa, 0x00, 0xcc));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "#", "#12345", "#3498dbff", "#zzzzzz", "#+1+2+3", "##fff", "##3498db"] {
            assert!(Rgb::from_hex(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn hex_output_is_lowercase() {
        assert_eq!(Rgb::new(0x34, 0x98, 0xDB).to_hex(), "#3498db");
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn blend_endpoints() {
        let bg = Rgb::new(0x34, 0x98, 0xdb);
        assert_eq!(bg.blend(Rgb::WHITE, 0), bg);
        assert_eq!(bg.blend(Rgb::WHITE, 255), Rgb::WHITE);
        let half = Rgb::BLACK.blend(Rgb::WHITE, 128);
        assert_eq!(half, Rgb::new(128, 128, 128));
    }
}
