//! Error types for qrbrand operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using qrbrand's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrbrand operations
#[derive(Error, Debug)]
pub enum Error {
    /// Contradictory or missing options, out-of-range values
    #[error("{0}")]
    Usage(String),

    /// A required input file does not exist or is not a regular file
    #[error("File not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// Color string could not be parsed
    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    /// QR code encoding failed (e.g. data exceeds capacity at the requested EC level)
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Rendered image did not decode back to the input data
    #[error("Rendered QR code does not decode to the input data ({expected} bytes expected, {actual} bytes decoded)")]
    VerificationFailed {
        /// Byte length of the input data
        expected: usize,
        /// Byte length of what the reader recovered
        actual: usize,
    },

    /// Output extension does not map to an image format that can be written
    #[error("Cannot write an image format for output path {}", .0.display())]
    UnsupportedOutputFormat(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error is a command-line usage problem rather than a runtime failure.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::InvalidColor(_))
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
