use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color format {0:?}: expected a 7 character #RRGGBB string")]
    InvalidColorFormat(String),
    #[error("malformed hex digits in color {0:?}")]
    MalformedHex(String),
}

/// An opaque 24-bit color, carried around as `#RRGGBB` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(hex: &str) -> Result<Self, Self::Err> {
        if !hex.starts_with('#') || hex.len() != 7 {
            return Err(ColorError::InvalidColorFormat(hex.to_owned()));
        }
        let digits = &hex[1..];
        // from_str_radix alone would let a leading '+' through.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::MalformedHex(hex.to_owned()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorError::MalformedHex(hex.to_owned()))?;

        Ok(Self {
            r: (value >> 16) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        })
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for termion::color::Rgb {
    fn from(color: Color) -> Self {
        termion::color::Rgb(color.r, color.g, color.b)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        image::Rgba([color.r, color.g, color.b, 0xFF])
    }
}
