//! QR code encoder

use crate::error::{Error, Result};
use qrcode::{Color, EcLevel, QrCode, Version};

/// QR code encoder pinned to error correction level H (~30% recoverable)
pub struct QrEncoder {
    ecc_level: EcLevel,
}

impl QrEncoder {
    /// Create an encoder using the highest error correction level
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::H,
        }
    }

    /// Encode a string into a module matrix, choosing the smallest version that fits.
    pub fn encode(&self, data: &str) -> Result<QrMatrix> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.ecc_level)
            .map_err(|e| {
                Error::QrEncode(format!("{e} ({} bytes at level H)", data.len()))
            })?;

        let matrix = QrMatrix {
            width: code.width(),
            version: code.version(),
            modules: code.to_colors(),
            data_len: data.len(),
        };
        tracing::debug!(
            version = matrix.version_number(),
            modules = matrix.width,
            bytes = matrix.data_len,
            "Encoded QR symbol"
        );
        Ok(matrix)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Square grid of dark/light modules, without quiet zone
#[derive(Debug, Clone)]
pub struct QrMatrix {
    width: usize,
    version: Version,
    modules: Vec<Color>,
    data_len: usize,
}

impl QrMatrix {
    /// Number of modules per side
    pub fn width(&self) -> usize {
        self.width
    }

    /// Symbol version (1..=40)
    pub fn version_number(&self) -> i16 {
        match self.version {
            Version::Normal(v) | Version::Micro(v) => v,
        }
    }

    /// Byte length of the encoded payload
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    /// Whether the module at column `x`, row `y` is dark.
    ///
    /// Coordinates outside the grid read as light, which is the quiet zone.
    pub fn is_dark(&self, x: isize, y: isize) -> bool {
        let w = self.width as isize;
        if x < 0 || y < 0 || x >= w || y >= w {
            return false;
        }
        self.modules[(y * w + x) as usize] == Color::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_hello_world() {
        let matrix = QrEncoder::new().encode("hello world").unwrap();
        // 11 bytes at level H needs version 2 (25x25)
        assert_eq!(matrix.version_number(), 2);
        assert_eq!(matrix.width(), 25);
        assert_eq!(matrix.data_len(), 11);
    }

    #[test]
    fn test_finder_pattern_corners() {
        let matrix = QrEncoder::new().encode("finder").unwrap();
        let w = matrix.width() as isize;
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.is_dark(w - 1, 0));
        assert!(matrix.is_dark(0, w - 1));
        // separator row below the top-left finder is light
        assert!(!matrix.is_dark(0, 7));
    }

    #[test]
    fn test_out_of_bounds_is_light() {
        let matrix = QrEncoder::new().encode("x").unwrap();
        assert!(!matrix.is_dark(-1, 0));
        assert!(!matrix.is_dark(0, matrix.width() as isize));
    }

    #[test]
    fn test_oversized_data_fails() {
        // Level H binary capacity tops out at 1273 bytes
        let data = "x".repeat(1300);
        let err = QrEncoder::new().encode(&data).unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)));
    }

    #[test]
    fn test_empty_data_encodes() {
        let matrix = QrEncoder::new().encode("").unwrap();
        assert_eq!(matrix.version_number(), 1);
        assert!(matrix.is_dark(0, 0));
    }
}
