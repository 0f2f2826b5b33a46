//! ARGB colors for background (highlight) annotations.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(u32);

/// Highlight used when neither the caller nor the config file supplies one.
pub const DEFAULT_HIGHLIGHT: Color = Color::from_argb(0xFFFF_EB3B);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must have 6 (RGB) or 8 (ARGB) hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digits in color {0:?}")]
    BadDigits(String),
}

impl Color {
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Opaque color from RGB components.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#RRGGBB` (opaque) and `#AARRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::BadDigits(s.to_string()));
        match digits.len() {
            6 => Ok(Self(0xFF00_0000 | value?)),
            8 => Ok(Self(value?)),
            _ => Err(ColorParseError::BadLength(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_as_opaque() {
        let c: Color = "#336699".parse().unwrap();
        assert_eq!(c.argb(), 0xFF33_6699);
        assert_eq!(c, Color::from_rgb(0x33, 0x66, 0x99));
        assert_eq!(c.alpha(), 0xFF);
    }

    #[test]
    fn parses_argb() {
        let c: Color = "#80FFEB3B".parse().unwrap();
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0xFF);
        assert_eq!(c.green(), 0xEB);
        assert_eq!(c.blue(), 0x3B);
        assert_eq!(c.to_string(), "#80FFEB3B");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            "336699".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#3366".parse::<Color>(),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            "#GG6699".parse::<Color>(),
            Err(ColorParseError::BadDigits(_))
        ));
    }
}
