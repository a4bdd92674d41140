//! qrbrand - branded QR code generation
//!
//! Encodes text into a QR symbol at error correction level H and renders it
//! as a 1024×1024 RGB image, with optional branding:
//!
//! - **Flat color**: any module and background color, square or rounded modules
//! - **Logo overlay**: a logo scaled to at most 1/N of the image, centred on top
//! - **Image fill**: module colors sampled from a supplied image
//!
//! # Example
//!
//! ```no_run
//! use qrbrand::{Color, DataSource, GenerateRequest, ModuleStyle, Variant, pipeline};
//!
//! fn main() -> qrbrand::Result<()> {
//!     let request = GenerateRequest {
//!         source: DataSource::Literal("hello world".to_string()),
//!         variant: Variant::FlatColor { color: "navy".parse()?, logo: None },
//!         background: Color::WHITE,
//!         style: ModuleStyle::Rounded,
//!         out: "hello.png".into(),
//!         verify: true,
//!     };
//!     let report = pipeline::run(&request)?;
//!     println!("QR version {}", report.version);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod qr;
pub mod render;

// Re-exports for convenience
pub use error::{Error, Result};

pub use color::Color;
pub use config::{LogRotation, LoggingOptions, QrbrandConfig, RenderDefaults};
pub use input::DataSource;
pub use output::GenerationReport;
pub use pipeline::{GenerateRequest, LogoOverlay, Variant};
pub use qr::{QrDecoder, QrEncoder, QrMatrix, QrPayload};
pub use render::{LogoRatio, ModuleStyle, OUTPUT_SIZE};
