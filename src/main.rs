//! qrbrand command-line entrypoint

use clap::error::ErrorKind;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use qrbrand::{
    Color, DataSource, Error, GenerateRequest, GenerationReport, LogoOverlay, LogoRatio,
    ModuleStyle, QrbrandConfig, RenderDefaults, Result, Variant, logging, pipeline,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "qrbrand", version, about = "Generate branded QR codes")]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrbrand.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print the generation report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a branded QR code, optionally with a logo in the middle.
    ///
    /// Exactly one of --data or --data-file must be passed. If --data-file is '-', stdin is read.
    #[command(name = "gen-qr-code")]
    GenQrCode(GenQrCodeArgs),

    /// Create a QR code whose modules are colored by an image
    #[command(name = "image-as-qr")]
    ImageAsQr(ImageAsQrArgs),
}

#[derive(Args, Debug)]
struct SharedArgs {
    /// The data to encode
    #[arg(long, allow_hyphen_values = true)]
    data: Option<String>,

    /// File holding the data to encode, or '-' for stdin
    #[arg(long, value_name = "PATH")]
    data_file: Option<String>,

    /// The background color of the QR code [default: white]
    #[arg(long, value_name = "COLOR")]
    back_color: Option<String>,

    /// Output image; the extension selects the format
    #[arg(long, value_name = "PATH")]
    out: PathBuf,

    /// Round the corners of the modules
    #[arg(long)]
    rounded: bool,

    /// Decode the rendered image and fail if it does not match the data
    #[arg(long)]
    verify: bool,
}

#[derive(Args, Debug)]
struct GenQrCodeArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// The logo to place in the middle of the QR code
    #[arg(long, value_name = "PATH")]
    logo: Option<PathBuf>,

    /// The logo is scaled to at most 1/N of the image size (N >= 3) [default: 3]
    #[arg(long, value_name = "N", value_parser = parse_logo_ratio)]
    logo_ratio: Option<LogoRatio>,

    /// The color of the QR code modules [default: black]
    #[arg(long, value_name = "COLOR")]
    color: Option<String>,
}

#[derive(Args, Debug)]
struct ImageAsQrArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// The image whose colors fill the QR code modules
    #[arg(long, value_name = "PATH")]
    logo: PathBuf,
}

fn parse_logo_ratio(value: &str) -> std::result::Result<LogoRatio, String> {
    value.parse::<LogoRatio>().map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_usage() => {
            let kind = match &err {
                Error::InvalidColor(_) => ErrorKind::InvalidValue,
                _ => ErrorKind::ArgumentConflict,
            };
            Cli::command().error(kind, err.to_string()).exit()
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = QrbrandConfig::load(cli.config.as_deref())?;
    config.logging.apply_verbosity(cli.verbose);
    // Held until `run` returns so the file writer flushes its last events.
    let _log_guard = logging::init(&config.logging)?;

    let request = match cli.command {
        Command::GenQrCode(args) => gen_qr_code_request(args, &config.render)?,
        Command::ImageAsQr(args) => image_as_qr_request(args, &config.render)?,
    };
    tracing::debug!(?request, "Built generation request");

    let report = pipeline::run(&request)?;
    print_report(&report, cli.json)
}

fn gen_qr_code_request(args: GenQrCodeArgs, defaults: &RenderDefaults) -> Result<GenerateRequest> {
    let color = Color::parse(args.color.as_deref().unwrap_or(&defaults.color))?;
    let ratio = match args.logo_ratio {
        Some(ratio) => ratio,
        None => LogoRatio::new(defaults.logo_ratio)?,
    };
    let logo = args.logo.map(|path| LogoOverlay { path, ratio });

    shared_request(args.shared, defaults, Variant::FlatColor { color, logo })
}

fn image_as_qr_request(args: ImageAsQrArgs, defaults: &RenderDefaults) -> Result<GenerateRequest> {
    shared_request(
        args.shared,
        defaults,
        Variant::MaskedImage { mask: args.logo },
    )
}

fn shared_request(
    shared: SharedArgs,
    defaults: &RenderDefaults,
    variant: Variant,
) -> Result<GenerateRequest> {
    let source = DataSource::from_options(shared.data, shared.data_file)?;
    let background = Color::parse(shared.back_color.as_deref().unwrap_or(&defaults.back_color))?;

    Ok(GenerateRequest {
        source,
        variant,
        background,
        style: ModuleStyle::from_flag(shared.rounded || defaults.rounded),
        out: shared.out,
        verify: shared.verify,
    })
}

fn print_report(report: &GenerationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.to_json()?)?);
    } else {
        for line in report.human_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
