//! Module shapes drawn into a coverage map

use crate::qr::QrMatrix;
use std::fmt;

/// Subsamples per pixel axis when anti-aliasing rounded corners
const SUPERSAMPLE: u32 = 4;

/// Shape used for dark modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleStyle {
    /// Plain squares
    #[default]
    Square,
    /// Corners facing away from dark neighbours are rounded
    Rounded,
}

impl ModuleStyle {
    /// Style matching a `--rounded` flag
    pub fn from_flag(rounded: bool) -> Self {
        if rounded { Self::Rounded } else { Self::Square }
    }
}

impl fmt::Display for ModuleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModuleStyle::Square => "square",
            ModuleStyle::Rounded => "rounded",
        })
    }
}

/// Per-pixel module coverage, 0.0 for background through 1.0 for a full module
#[derive(Debug, Clone)]
pub struct CoverageMap {
    size: u32,
    values: Vec<f32>,
}

impl CoverageMap {
    /// Draw every dark module of `matrix`, `box_size` pixels each, inside a
    /// `border`-module quiet zone.
    pub fn draw(matrix: &QrMatrix, box_size: u32, border: u32, style: ModuleStyle) -> Self {
        let size = (matrix.width() as u32 + 2 * border) * box_size;
        let mut map = Self {
            size,
            values: vec![0.0; (size * size) as usize],
        };

        let w = matrix.width() as isize;
        for my in 0..w {
            for mx in 0..w {
                if !matrix.is_dark(mx, my) {
                    continue;
                }
                let corners = match style {
                    ModuleStyle::Square => Corners::default(),
                    ModuleStyle::Rounded => Corners::exposed(matrix, mx, my),
                };
                let x0 = (mx as u32 + border) * box_size;
                let y0 = (my as u32 + border) * box_size;
                map.fill_module(x0, y0, box_size, corners);
            }
        }
        map
    }

    /// Side length in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Coverage at pixel (`x`, `y`)
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[(y * self.size + x) as usize]
    }

    fn fill_module(&mut self, x0: u32, y0: u32, box_size: u32, corners: Corners) {
        let half = box_size as f32 / 2.0;
        for dy in 0..box_size {
            for dx in 0..box_size {
                let left = (dx as f32) < half;
                let top = (dy as f32) < half;
                let rounded = match (left, top) {
                    (true, true) => corners.top_left,
                    (false, true) => corners.top_right,
                    (true, false) => corners.bottom_left,
                    (false, false) => corners.bottom_right,
                };
                let value = if rounded {
                    disc_coverage(dx, dy, half)
                } else {
                    1.0
                };
                let idx = ((y0 + dy) * self.size + x0 + dx) as usize;
                self.values[idx] = value;
            }
        }
    }
}

/// Fraction of pixel (`dx`, `dy`) inside the disc of radius `half`
/// centred on the module.
fn disc_coverage(dx: u32, dy: u32, half: f32) -> f32 {
    let step = 1.0 / SUPERSAMPLE as f32;
    let mut inside = 0;
    for sy in 0..SUPERSAMPLE {
        for sx in 0..SUPERSAMPLE {
            let px = dx as f32 + (sx as f32 + 0.5) * step - half;
            let py = dy as f32 + (sy as f32 + 0.5) * step - half;
            if px * px + py * py <= half * half {
                inside += 1;
            }
        }
    }
    inside as f32 / (SUPERSAMPLE * SUPERSAMPLE) as f32
}

#[derive(Debug, Clone, Copy, Default)]
struct Corners {
    top_left: bool,
    top_right: bool,
    bottom_left: bool,
    bottom_right: bool,
}

impl Corners {
    /// A corner is rounded when neither neighbour sharing it is dark.
    fn exposed(matrix: &QrMatrix, x: isize, y: isize) -> Self {
        let left = matrix.is_dark(x - 1, y);
        let right = matrix.is_dark(x + 1, y);
        let up = matrix.is_dark(x, y - 1);
        let down = matrix.is_dark(x, y + 1);
        Self {
            top_left: !left && !up,
            top_right: !right && !up,
            bottom_left: !left && !down,
            bottom_right: !right && !down,
        }
    }
}
