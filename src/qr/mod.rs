//! QR code encoding and verification decoding
//!
//! Encoding is delegated to the `qrcode` crate at the highest error
//! correction level so that logos and image fills can occlude part of the
//! symbol. Decoding uses `rqrr` and exists only to check rendered output.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::{QrEncoder, QrMatrix};

/// A decoded QR code payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
