use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

use qrbrand::{
    Color, DataSource, Error, GenerateRequest, LogoOverlay, LogoRatio, ModuleStyle, QrDecoder,
    Variant, pipeline,
};

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("qrbrand-test-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn flat(data: &str, out: &Path) -> GenerateRequest {
    GenerateRequest {
        source: DataSource::Literal(data.to_string()),
        variant: Variant::FlatColor {
            color: Color::BLACK,
            logo: None,
        },
        background: Color::WHITE,
        style: ModuleStyle::Square,
        out: out.to_path_buf(),
        verify: false,
    }
}

fn decode_file(path: &Path) -> String {
    let img = image::open(path).expect("open output");
    let payload = QrDecoder::new().decode(&img).expect("decode output");
    payload.as_str().expect("utf-8 payload").to_string()
}

#[test]
fn hello_world_round_trip() {
    let dir = scratch_dir();
    let out = dir.join("out.png");

    let report = pipeline::run(&flat("hello world", &out)).expect("generate");

    assert_eq!(report.out, out);
    let img = image::open(&out).expect("open output");
    assert_eq!(img.dimensions(), (1024, 1024));
    assert!(matches!(img, DynamicImage::ImageRgb8(_)));
    assert_eq!(decode_file(&out), "hello world");
}

#[test]
fn rounded_modules_still_decode() {
    let dir = scratch_dir();
    let out = dir.join("rounded.png");
    let mut request = flat("rounded corners", &out);
    request.style = ModuleStyle::Rounded;
    request.variant = Variant::FlatColor {
        color: Color([0, 51, 102]),
        logo: None,
    };

    pipeline::run(&request).expect("generate");
    assert_eq!(decode_file(&out), "rounded corners");
}

#[test]
fn multiline_payload_is_kept_verbatim() {
    let dir = scratch_dir();
    let data_file = dir.join("data.txt");
    fs::write(&data_file, "\u{feff}first line\nsecond line\n").expect("write data");
    let out = dir.join("multiline.png");

    let mut request = flat("", &out);
    request.source = DataSource::File(data_file);
    pipeline::run(&request).expect("generate");

    assert_eq!(decode_file(&out), "first line\nsecond line\n");
}

#[test]
fn logo_is_scaled_and_centred() {
    let dir = scratch_dir();
    let logo_path = dir.join("logo.png");
    RgbaImage::from_pixel(900, 450, Rgba([200, 30, 30, 255]))
        .save(&logo_path)
        .expect("write logo");
    let out = dir.join("logo.png.out.png");

    let mut request = flat("https://example.com/brand", &out);
    request.variant = Variant::FlatColor {
        color: Color::BLACK,
        logo: Some(LogoOverlay {
            path: logo_path,
            ratio: LogoRatio::new(5.0).expect("ratio"),
        }),
    };
    request.verify = true;

    let report = pipeline::run(&request).expect("generate");
    let placement = report.logo.expect("logo placed");

    // 1024 / 5 = 204 px bound, 2:1 aspect ratio
    assert_eq!((placement.width, placement.height), (204, 102));
    assert!((placement.x * 2 + placement.width).abs_diff(1024) <= 1);
    assert!((placement.y * 2 + placement.height).abs_diff(1024) <= 1);

    let img = image::open(&out).expect("open output").to_rgb8();
    assert_eq!(*img.get_pixel(512, 512), Rgb([200, 30, 30]));
    assert_eq!(decode_file(&out), "https://example.com/brand");
}

#[test]
fn small_logo_keeps_its_size() {
    let dir = scratch_dir();
    let logo_path = dir.join("small.png");
    RgbImage::from_pixel(40, 20, Rgb([0, 200, 0]))
        .save(&logo_path)
        .expect("write logo");
    let out = dir.join("small-logo.png");

    let mut request = flat("small logo", &out);
    request.variant = Variant::FlatColor {
        color: Color::BLACK,
        logo: Some(LogoOverlay {
            path: logo_path,
            ratio: LogoRatio::default(),
        }),
    };

    let report = pipeline::run(&request).expect("generate");
    let placement = report.logo.expect("logo placed");
    assert_eq!((placement.width, placement.height), (40, 20));
    assert_eq!((placement.x, placement.y), (492, 502));
}

#[test]
fn image_mask_variant_decodes() {
    let dir = scratch_dir();
    let mask_path = dir.join("mask.png");
    RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 2) as u8, 0, 60 + y as u8]))
        .save(&mask_path)
        .expect("write mask");
    let out = dir.join("masked.png");

    let mut request = flat("image as qr", &out);
    request.variant = Variant::MaskedImage { mask: mask_path };
    request.verify = true;

    let report = pipeline::run(&request).expect("generate");
    assert_eq!(report.variant, "masked-image");
    assert!(report.logo.is_none());

    let img = image::open(&out).expect("open output").to_rgb8();
    assert_eq!(img.dimensions(), (1024, 1024));
    assert_eq!(decode_file(&out), "image as qr");
}

#[test]
fn image_mask_with_rounded_modules_decodes() {
    let dir = scratch_dir();
    let mask_path = dir.join("gradient.png");
    RgbImage::from_fn(96, 96, |x, y| Rgb([20 + x as u8, 40, 200 - y as u8]))
        .save(&mask_path)
        .expect("write mask");
    let out = dir.join("masked-rounded.png");

    let mut request = flat("https://example.com/rounded", &out);
    request.variant = Variant::MaskedImage { mask: mask_path };
    request.style = ModuleStyle::Rounded;
    request.verify = true;

    let report = pipeline::run(&request).expect("generate");
    assert!(report.rounded);
    assert!(report.verified);
    assert_eq!(decode_file(&out), "https://example.com/rounded");
}

#[test]
fn missing_mask_writes_nothing() {
    let dir = scratch_dir();
    let out = dir.join("never.png");
    let mut request = flat("x", &out);
    request.variant = Variant::MaskedImage {
        mask: dir.join("absent.png"),
    };

    let err = pipeline::run(&request).unwrap_err();
    assert!(matches!(err, Error::ResourceNotFound(_)));
    assert!(!out.exists());
}

#[test]
fn rounded_output_differs_from_square() {
    let dir = scratch_dir();
    let square_out = dir.join("square.png");
    let rounded_out = dir.join("rounded.png");

    pipeline::run(&flat("same data", &square_out)).expect("square");
    let mut rounded = flat("same data", &rounded_out);
    rounded.style = ModuleStyle::Rounded;
    pipeline::run(&rounded).expect("rounded");

    let a = image::open(&square_out).expect("open").to_rgb8();
    let b = image::open(&rounded_out).expect("open").to_rgb8();
    assert_ne!(a, b);
}
