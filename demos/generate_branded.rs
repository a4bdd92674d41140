//! Generate a few branded QR codes in the current directory
//!
//! Usage: cargo run --example generate_branded

use image::{Rgba, RgbaImage};
use qrbrand::{
    Color, DataSource, GenerateRequest, LogoOverlay, LogoRatio, ModuleStyle, Variant, pipeline,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // A plain rounded code in brand colors
    let report = pipeline::run(&GenerateRequest {
        source: DataSource::Literal("https://example.com".to_string()),
        variant: Variant::FlatColor {
            color: "#003366".parse()?,
            logo: None,
        },
        background: Color::WHITE,
        style: ModuleStyle::Rounded,
        out: "qr_rounded.png".into(),
        verify: true,
    })?;
    println!("✓ {}", report.human_lines().join("\n"));

    // A generated badge used both as a centred logo and as a module fill
    let badge = RgbaImage::from_fn(300, 300, |x, y| {
        Rgba([(x * 255 / 300) as u8, 40, (y * 255 / 300) as u8, 255])
    });
    badge.save("badge.png")?;

    let report = pipeline::run(&GenerateRequest {
        source: DataSource::Literal("https://example.com/logo".to_string()),
        variant: Variant::FlatColor {
            color: Color::BLACK,
            logo: Some(LogoOverlay {
                path: "badge.png".into(),
                ratio: LogoRatio::new(4.0)?,
            }),
        },
        background: Color::WHITE,
        style: ModuleStyle::Square,
        out: "qr_logo.png".into(),
        verify: true,
    })?;
    println!("✓ {}", report.human_lines().join("\n"));

    let report = pipeline::run(&GenerateRequest {
        source: DataSource::Literal("https://example.com/fill".to_string()),
        variant: Variant::MaskedImage {
            mask: "badge.png".into(),
        },
        background: Color::WHITE,
        style: ModuleStyle::Rounded,
        out: "qr_filled.png".into(),
        verify: false,
    })?;
    println!("✓ {}", report.human_lines().join("\n"));

    Ok(())
}
