//! Color strings accepted by `--color` and `--back-color`
//!
//! Anything CSS understands is accepted: the full named-color set, hex
//! triplets, `rgb()`, `hsl()`, `hsv()` and `hwb()`. Alpha is dropped since
//! output images are RGB.

use crate::error::{Error, Result};
use image::Rgb;
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Pure black
    pub const BLACK: Color = Color([0, 0, 0]);
    /// Pure white
    pub const WHITE: Color = Color([255, 255, 255]);

    /// Parse a CSS color string.
    pub fn parse(value: &str) -> Result<Self> {
        let parsed = csscolorparser::parse(value.trim())
            .map_err(|_| Error::InvalidColor(value.to_string()))?;
        let [r, g, b, _] = parsed.to_rgba8();
        Ok(Color([r, g, b]))
    }

    /// The color as an `image` pixel
    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
