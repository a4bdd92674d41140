//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage};

/// QR code decoder used to verify rendered images
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        self.decode_gray(img.to_luma8())
    }

    /// Decode the first QR code found in a grayscale image
    pub fn decode_gray(&self, img: GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img);
        let grids = prepared.detect_grids();

        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        let mut content = Vec::new();
        match grid.decode_to(&mut content) {
            Ok(meta) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );
                Ok(QrPayload::from_bytes(content))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }

    /// Decode `img` and fail unless it carries exactly `expected`.
    pub fn verify(&self, img: &DynamicImage, expected: &str) -> Result<QrPayload> {
        let payload = self.decode(img)?;
        if payload.as_bytes() != expected.as_bytes() {
            return Err(Error::VerificationFailed {
                expected: expected.len(),
                actual: payload.as_bytes().len(),
            });
        }
        Ok(payload)
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
