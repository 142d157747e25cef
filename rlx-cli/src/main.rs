mod convert;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use thiserror::Error;

use lib_rlx::codec::{self, EncodeError, EncodeOptions, EncodedImage};
use lib_rlx::constants::{BINARY_EXTENSION, DEFAULT_MAX_COLOURS, LOADER_EXTENSION};
use lib_rlx::raster::PixelRaster;
use lib_rlx::screen5::{emit, EmitError, LoaderScript};

use convert::{load_raster, output_path, parse_background, ConvertError};

/// PNG to RLX (Running XOR) encoder for SCREEN 5 targets.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image or images to convert
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Define the number of colours in the image (power of two, at most 16)
    #[arg(long, default_value_t = DEFAULT_MAX_COLOURS)]
    num_colours: usize,

    /// Image contains an embedded palette in the first line
    #[arg(short, long)]
    contains_palette: bool,

    /// Background colour as rrggbb hex, reserved at index 0
    #[arg(short, long, default_value = "000000")]
    background: String,

    /// Erase run interiors and record edge transition statistics
    #[arg(short, long)]
    erase_runs: bool,

    /// Write the edge transition table next to the outputs as JSON
    #[arg(long)]
    edge_stats: bool,

    /// Decode the encoded raster back and compare it against the source
    #[arg(long)]
    verify: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Convert(#[from] ConvertError),
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("Emission failed: {0}")]
    Emit(#[from] EmitError),
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Edge statistics serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Verification failed: decoded raster does not match the source")]
    VerifyMismatch,
}

fn main() -> ExitCode {
    lib_rlx::init_logging();
    let args = Args::parse();

    if !args.num_colours.is_power_of_two() || args.num_colours > 16 {
        eprintln!("--num-colours must be a power of two between 2 and 16");
        return ExitCode::FAILURE;
    }

    let background = match parse_background(&args.background) {
        Ok(background) => background,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let options = EncodeOptions {
        max_colours: args.num_colours,
        contains_palette: args.contains_palette,
        background,
        erase_runs: args.erase_runs,
    };

    let mut failures = 0usize;
    for path in &args.images {
        if let Err(e) = process_image(path, &options, &args) {
            failures += 1;
            error!("image {path:?} failed: {e}");
            eprintln!("image \"{}\" not converted: {e}", path.display());
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Converts one image; every artifact is built in memory before anything
/// is written, so a failure leaves no partial output behind.
fn process_image(path: &Path, options: &EncodeOptions, args: &Args) -> Result<(), CliError> {
    info!("processing {path:?}");

    let pixels = load_raster(path)?;
    let encoded = codec::encode(&pixels, None, options)?;

    if args.verify {
        if options.erase_runs {
            warn!("skipping verification: run erasure is not reversible");
        } else {
            verify_roundtrip(&pixels, &encoded, options)?;
        }
    }

    let packed = emit(&encoded.raster)?;

    let binary_path = output_path(path, BINARY_EXTENSION);
    let loader_path = output_path(path, LOADER_EXTENSION);
    let binary_name = binary_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_uppercase();
    let loader = LoaderScript::new(
        &encoded.palette,
        encoded.raster.width() as u16,
        encoded.raster.height() as u16,
    );

    fs::write(&binary_path, &packed)?;
    fs::write(&loader_path, loader.to_basic(&binary_name))?;
    println!("new image in \"{}\"", binary_path.display());

    if args.edge_stats {
        let stats_path = output_path(path, "edges.json");
        fs::write(&stats_path, serde_json::to_vec_pretty(&encoded.edges.entries())?)?;
        println!("edge statistics in \"{}\"", stats_path.display());
    }

    Ok(())
}

/// Decodes the encoded raster back and compares every pixel against the
/// source through the palette.
fn verify_roundtrip(
    pixels: &PixelRaster,
    encoded: &EncodedImage,
    options: &EncodeOptions,
) -> Result<(), CliError> {
    let mut decoded = encoded.raster.clone();
    codec::decode(&mut decoded, options.contains_palette);

    let map = encoded.palette.index_map();
    for (y, (index_row, pixel_row)) in decoded.rows().zip(pixels.rows()).enumerate() {
        for (x, (&index, &colour)) in index_row.iter().zip(pixel_row.iter()).enumerate() {
            if map.colour_of(index) != Some(colour) {
                error!("round trip mismatch at ({x}, {y})");
                return Err(CliError::VerifyMismatch);
            }
        }
    }

    info!("round trip verified");
    Ok(())
}
