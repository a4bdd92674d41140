//! Logo scaling and centring

use super::{LogoRatio, flatten};
use crate::color::Color;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use serde::Serialize;

/// Where a logo ended up on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogoPlacement {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Placed width
    pub width: u32,
    /// Placed height
    pub height: u32,
}

/// Shrink `logo` to fit within 1/`ratio` of a `canvas_width`×`canvas_height`
/// canvas, keeping its aspect ratio.
///
/// Logos already inside the bound are returned unchanged; they are never enlarged.
pub fn fit_logo(
    logo: &DynamicImage,
    canvas_width: u32,
    canvas_height: u32,
    ratio: LogoRatio,
) -> DynamicImage {
    let (max_w, max_h) = ratio.bound(canvas_width, canvas_height);
    let (w, h) = (logo.width(), logo.height());
    if w <= max_w && h <= max_h {
        return logo.clone();
    }

    let (new_w, new_h) = contain_size(w, h, max_w, max_h);
    tracing::debug!(from = ?(w, h), to = ?(new_w, new_h), "Scaling logo");
    logo.resize_exact(new_w, new_h, FilterType::Lanczos3)
}

/// Largest size with the aspect ratio of `w`×`h` that fits in `max_w`×`max_h`.
fn contain_size(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let src = w as f64 / h as f64;
    let dest = max_w as f64 / max_h as f64;
    let (new_w, new_h) = if src > dest {
        (max_w, (h as f64 / w as f64 * max_w as f64).round() as u32)
    } else if src < dest {
        ((w as f64 / h as f64 * max_h as f64).round() as u32, max_h)
    } else {
        (max_w, max_h)
    };
    (new_w.max(1), new_h.max(1))
}

/// Paste `logo` at the centre of `canvas`, hiding every module beneath it.
///
/// Transparent logo pixels show `background` rather than the modules.
pub fn overlay_logo(canvas: &mut RgbImage, logo: &DynamicImage, background: Color) -> LogoPlacement {
    let flat = flatten(logo, background);
    let x = canvas.width().saturating_sub(flat.width()) / 2;
    let y = canvas.height().saturating_sub(flat.height()) / 2;
    imageops::replace(canvas, &flat, x as i64, y as i64);

    LogoPlacement {
        x,
        y,
        width: flat.width().min(canvas.width()),
        height: flat.height().min(canvas.height()),
    }
}
