//! Rasterisation of QR matrices into branded images
//!
//! Rendering happens in three steps: module shapes are drawn into a
//! coverage map at a native scale, the map is colorised against the
//! background with either a flat fill or a color mask image, and the
//! result is resampled to the fixed [`OUTPUT_SIZE`].

mod logo;
mod modules;

pub use logo::{LogoPlacement, fit_logo, overlay_logo};
pub use modules::{CoverageMap, ModuleStyle};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::qr::QrMatrix;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use std::fmt;
use std::str::FromStr;

/// Width and height of every rendered image, in pixels
pub const OUTPUT_SIZE: u32 = 1024;

/// Pixels per module at native scale
pub const BOX_SIZE: u32 = 10;

/// Quiet zone width, in modules
pub const BORDER: u32 = 4;

/// How dark modules are colored
#[derive(Debug, Clone)]
pub enum Fill {
    /// One flat color for every module
    Solid(Color),
    /// Module pixels take the color of the mask image at the same position.
    /// The mask is stretched over the whole symbol, quiet zone included.
    ImageMask(RgbImage),
}

impl Fill {
    /// Build a mask fill, flattening any transparency over `background`.
    pub fn image_mask(mask: &DynamicImage, background: Color) -> Self {
        Fill::ImageMask(flatten(mask, background))
    }
}

/// Complete rendering configuration
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Module coloring
    pub fill: Fill,
    /// Quiet zone and light module color
    pub background: Color,
    /// Square or rounded modules
    pub style: ModuleStyle,
}

/// Render `matrix` to an [`OUTPUT_SIZE`]×[`OUTPUT_SIZE`] RGB image.
pub fn render(matrix: &QrMatrix, options: &RenderOptions) -> RgbImage {
    let coverage = CoverageMap::draw(matrix, BOX_SIZE, BORDER, options.style);
    let native = colorize(&coverage, &options.fill, options.background);
    tracing::debug!(
        native = native.width(),
        output = OUTPUT_SIZE,
        style = %options.style,
        "Resampling rendered symbol"
    );
    normalize(&native)
}

fn colorize(coverage: &CoverageMap, fill: &Fill, background: Color) -> RgbImage {
    let size = coverage.size();
    let foreground = match fill {
        Fill::Solid(color) => Foreground::Flat(color.to_rgb()),
        Fill::ImageMask(mask) => {
            Foreground::Sampled(imageops::resize(mask, size, size, FilterType::Triangle))
        }
    };
    let bg = background.to_rgb();

    RgbImage::from_fn(size, size, |x, y| {
        let alpha = coverage.get(x, y);
        if alpha <= 0.0 {
            return bg;
        }
        let fg = match &foreground {
            Foreground::Flat(color) => *color,
            Foreground::Sampled(mask) => *mask.get_pixel(x, y),
        };
        blend(bg, fg, alpha)
    })
}

enum Foreground {
    Flat(Rgb<u8>),
    Sampled(RgbImage),
}

fn normalize(native: &RgbImage) -> RgbImage {
    if native.dimensions() == (OUTPUT_SIZE, OUTPUT_SIZE) {
        return native.clone();
    }
    imageops::resize(native, OUTPUT_SIZE, OUTPUT_SIZE, FilterType::CatmullRom)
}

fn blend(bg: Rgb<u8>, fg: Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let mix = |b: u8, f: u8| (b as f32 + (f as f32 - b as f32) * alpha).round() as u8;
    Rgb([mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])])
}

/// Composite an image with transparency over a solid color.
pub(crate) fn flatten(img: &DynamicImage, background: Color) -> RgbImage {
    let rgba = img.to_rgba8();
    let bg = background.to_rgb();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let px = rgba.get_pixel(x, y);
        blend(bg, Rgb([px[0], px[1], px[2]]), px[3] as f32 / 255.0)
    })
}

/// Fraction of the image a logo may span, expressed as a divisor (>= 3)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoRatio(f64);

impl LogoRatio {
    /// Smallest accepted divisor
    pub const MIN: f64 = 3.0;

    /// Validate a divisor
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= Self::MIN {
            Ok(Self(value))
        } else {
            Err(Error::Usage(format!(
                "logo ratio must be a number >= {}, got {value}",
                Self::MIN
            )))
        }
    }

    /// The divisor
    pub fn get(self) -> f64 {
        self.0
    }

    /// Largest logo box allowed on a `width`×`height` canvas
    pub fn bound(self, width: u32, height: u32) -> (u32, u32) {
        (
            (width as f64 / self.0) as u32,
            (height as f64 / self.0) as u32,
        )
    }
}

impl Default for LogoRatio {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl FromStr for LogoRatio {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let parsed: f64 = value
            .trim()
            .parse()
            .map_err(|_| Error::Usage(format!("logo ratio '{value}' is not a number")))?;
        Self::new(parsed)
    }
}

impl fmt::Display for LogoRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
