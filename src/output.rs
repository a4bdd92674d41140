//! Writing rendered images and describing what was written

use crate::error::{Error, Result};
use crate::render::LogoPlacement;
use image::{ImageFormat, RgbImage};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Image format implied by the extension of `path`.
///
/// Only formats that can encode a 1024×1024 RGB8 image are accepted, so a
/// rejected extension never gets as far as creating the file.
pub fn format_for(path: &Path) -> Result<ImageFormat> {
    let unsupported = || Error::UnsupportedOutputFormat(path.to_path_buf());
    let format = ImageFormat::from_path(path).map_err(|_| unsupported())?;
    if !format.writing_enabled() || !accepts_rgb8_output(format) {
        return Err(unsupported());
    }
    Ok(format)
}

/// ICO tops out at 256px, HDR and OpenEXR only encode float pixels and
/// farbfeld only RGBA16.
fn accepts_rgb8_output(format: ImageFormat) -> bool {
    !matches!(
        format,
        ImageFormat::Ico | ImageFormat::Hdr | ImageFormat::OpenExr | ImageFormat::Farbfeld
    )
}

/// Encode `image` to `path` in the format implied by its extension.
///
/// Existing files are overwritten. The write is not atomic.
pub fn write_image(image: &RgbImage, path: &Path) -> Result<()> {
    let format = format_for(path)?;
    image.save_with_format(path, format)?;
    tracing::info!(path = %path.display(), ?format, "Wrote QR image");
    Ok(())
}

/// Summary of one generated QR image
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Output file
    pub out: PathBuf,
    /// Rendering variant (`flat-color` or `masked-image`)
    pub variant: &'static str,
    /// QR version chosen by the encoder
    pub version: i16,
    /// Modules per side
    pub modules: usize,
    /// Payload size in bytes
    pub data_bytes: usize,
    /// Output width and height in pixels
    pub size: u32,
    /// Whether modules were rounded
    pub rounded: bool,
    /// Placed logo rectangle, if a logo was overlaid
    pub logo: Option<LogoPlacement>,
    /// Whether the image was decoded back and matched
    pub verified: bool,
}

impl GenerationReport {
    /// Structured form for `--json`
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Human-readable lines for the terminal
    pub fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Wrote {}", self.out.display()),
            format!("  Variant: {}", self.variant),
            format!(
                "  QR version: {} ({}x{} modules, level H)",
                self.version, self.modules, self.modules
            ),
            format!("  Payload: {} bytes", self.data_bytes),
            format!("  Image: {}x{} RGB", self.size, self.size),
        ];
        if self.rounded {
            lines.push("  Modules: rounded".to_string());
        }
        if let Some(logo) = &self.logo {
            lines.push(format!(
                "  Logo: {}x{} at ({}, {})",
                logo.width, logo.height, logo.x, logo.y
            ));
        }
        if self.verified {
            lines.push("  Verified: decodes to input".to_string());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> GenerationReport {
        GenerationReport {
            out: PathBuf::from("out.png"),
            variant: "flat-color",
            version: 2,
            modules: 25,
            data_bytes: 11,
            size: 1024,
            rounded: false,
            logo: Some(LogoPlacement {
                x: 341,
                y: 426,
                width: 341,
                height: 171,
            }),
            verified: true,
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_for(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(format_for(Path::new("a.JPG")).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            format_for(Path::new("a.unknown")),
            Err(Error::UnsupportedOutputFormat(_))
        ));
        assert!(matches!(
            format_for(Path::new("noext")),
            Err(Error::UnsupportedOutputFormat(_))
        ));
    }

    #[test]
    fn test_unwritable_formats_rejected() {
        for name in ["out.dds", "out.ico", "out.hdr", "out.exr", "out.ff"] {
            assert!(
                matches!(
                    format_for(Path::new(name)),
                    Err(Error::UnsupportedOutputFormat(_))
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_common_formats_accepted() {
        for name in ["out.png", "out.jpeg", "out.bmp", "out.gif", "out.tiff", "out.webp"] {
            assert!(format_for(Path::new(name)).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_report_json() {
        let json = report().to_json().unwrap();
        assert_eq!(json["variant"], "flat-color");
        assert_eq!(json["size"], 1024);
        assert_eq!(json["logo"]["width"], 341);
        assert_eq!(json["verified"], true);
    }

    #[test]
    fn test_report_human_lines() {
        let lines = report().human_lines();
        assert_eq!(lines[0], "Wrote out.png");
        assert!(lines.iter().any(|l| l == "  Logo: 341x171 at (341, 426)"));
        assert!(!lines.iter().any(|l| l.contains("rounded")));
    }
}
