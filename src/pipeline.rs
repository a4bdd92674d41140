//! One pipeline for both commands: resolve input, encode, render, brand, write
//!
//! Every check that can fail without touching image data (missing files,
//! unknown output extension) runs before the payload is read, so a failed
//! invocation never leaves an output file behind.

use crate::color::Color;
use crate::error::Result;
use crate::input::{DataSource, require_file};
use crate::output::{self, GenerationReport};
use crate::qr::{QrDecoder, QrEncoder};
use crate::render::{self, Fill, LogoRatio, ModuleStyle, OUTPUT_SIZE, RenderOptions};
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Logo pasted over the centre of a flat-color code
#[derive(Debug, Clone, PartialEq)]
pub struct LogoOverlay {
    /// Image file
    pub path: PathBuf,
    /// The logo spans at most 1/ratio of the image
    pub ratio: LogoRatio,
}

/// Rendering variant
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// Modules in one color, optionally with a centred logo
    FlatColor {
        /// Module color
        color: Color,
        /// Optional logo
        logo: Option<LogoOverlay>,
    },
    /// Module colors sampled from an image
    MaskedImage {
        /// Image file providing the colors
        mask: PathBuf,
    },
}

impl Variant {
    /// Name used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Variant::FlatColor { .. } => "flat-color",
            Variant::MaskedImage { .. } => "masked-image",
        }
    }

    fn image_inputs(&self) -> Vec<&Path> {
        match self {
            Variant::FlatColor { logo, .. } => logo.iter().map(|l| l.path.as_path()).collect(),
            Variant::MaskedImage { mask } => vec![mask.as_path()],
        }
    }
}

/// Everything needed to produce one QR image
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Where the payload comes from
    pub source: DataSource,
    /// Flat or masked rendering
    pub variant: Variant,
    /// Background color
    pub background: Color,
    /// Module shape
    pub style: ModuleStyle,
    /// Output file; the extension selects the format
    pub out: PathBuf,
    /// Decode the result and compare with the payload before writing
    pub verify: bool,
}

impl GenerateRequest {
    /// Checks that need no image processing: input files exist, output format is known.
    pub fn validate(&self) -> Result<()> {
        self.source.check_exists()?;
        for path in self.variant.image_inputs() {
            require_file(path)?;
        }
        output::format_for(&self.out)?;
        Ok(())
    }
}

/// Run the whole pipeline and write the output file.
pub fn run(request: &GenerateRequest) -> Result<GenerationReport> {
    let started = Instant::now();
    request.validate()?;

    let data = request.source.resolve()?;
    tracing::info!(
        source = %request.source.describe(),
        bytes = data.len(),
        "Resolved QR payload"
    );

    let (image, report) = generate(request, &data)?;
    output::write_image(&image, &request.out)?;

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        variant = report.variant,
        "Generated QR code"
    );
    Ok(report)
}

/// Render `data` according to `request` without writing anything.
pub fn generate(request: &GenerateRequest, data: &str) -> Result<(RgbImage, GenerationReport)> {
    let matrix = QrEncoder::new().encode(data)?;

    let fill = match &request.variant {
        Variant::FlatColor { color, .. } => Fill::Solid(*color),
        Variant::MaskedImage { mask } => {
            let mask = open_image(mask)?;
            Fill::image_mask(&mask, request.background)
        }
    };
    let options = RenderOptions {
        fill,
        background: request.background,
        style: request.style,
    };
    let mut image = render::render(&matrix, &options);

    let mut placement = None;
    if let Variant::FlatColor {
        logo: Some(overlay),
        ..
    } = &request.variant
    {
        let logo = open_image(&overlay.path)?;
        let fitted = render::fit_logo(&logo, image.width(), image.height(), overlay.ratio);
        let placed = render::overlay_logo(&mut image, &fitted, request.background);
        tracing::info!(
            ratio = overlay.ratio.get(),
            width = placed.width,
            height = placed.height,
            x = placed.x,
            y = placed.y,
            "Overlaid logo"
        );
        placement = Some(placed);
    }

    if request.verify {
        QrDecoder::new().verify(&DynamicImage::ImageRgb8(image.clone()), data)?;
        tracing::info!("Rendered image decodes to the input payload");
    }

    let report = GenerationReport {
        out: request.out.clone(),
        variant: request.variant.label(),
        version: matrix.version_number(),
        modules: matrix.width(),
        data_bytes: matrix.data_len(),
        size: OUTPUT_SIZE,
        rounded: request.style == ModuleStyle::Rounded,
        logo: placement,
        verified: request.verify,
    };
    Ok((image, report))
}

fn open_image(path: &Path) -> Result<DynamicImage> {
    require_file(path)?;
    let img = image::open(path)?;
    tracing::debug!(path = %path.display(), width = img.width(), height = img.height(), "Loaded image");
    Ok(img)
}
