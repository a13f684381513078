use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use fits_annotate::image_pipeline::{ConversionConfig, FitsToJpegPipeline};
use fits_annotate::logger;

use tracing::{error, info};

const USAGE: &str = "Usage: fits-annotate <image_path> <json_meta> [--font <path>] [--output-dir <dir>]";

/// Convert a three-plane FITS cube into an annotated JPEG
#[derive(Parser, Debug)]
#[command(name = "fits-annotate", version)]
struct Cli {
    /// FITS cube whose first three planes are red, green and blue
    image_path: PathBuf,

    /// JSON file with author, lensName, idName and locationName
    json_meta: PathBuf,

    /// Font used for the caption
    #[arg(long, env = "FITS_ANNOTATE_FONT")]
    font: Option<PathBuf>,

    /// Directory the annotated JPEG is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

/// Parses the command line, program name first.
///
/// On failure returns the exit code: 0 after `--help` or `--version`, 1 after
/// printing the usage line for any other argument error.
fn parse_args<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            Err(0)
        }
        Err(_) => {
            println!("{USAGE}");
            Err(1)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => std::process::exit(i32::from(code)),
    };

    logger::init();

    info!("Starting fits-annotate...");

    let mut builder = ConversionConfig::builder().output_dir(cli.output_dir);
    if let Some(font) = cli.font {
        builder = builder.font_path(font);
    }
    let config = builder.build();

    info!("Font: {}", config.font_path.display());
    info!("Output directory: {}", config.output_dir.display());

    let pipeline = FitsToJpegPipeline::new(config).context("failed to initialize pipeline")?;

    match pipeline.convert_file(&cli.image_path, &cli.json_meta) {
        Ok(path) => {
            println!("Image saved as {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e).with_context(|| format!("converting {}", cli.image_path.display()))
        }
    }
}
