//! Boundary with the external image codec and the filesystem naming
//! convention.

use std::path::{Path, PathBuf};

use lib_rlx::constants::OUTPUT_PREFIX;
use lib_rlx::raster::{PixelRaster, RasterError, Rgb};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to open the image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Image does not form a raster: {0}")]
    Raster(#[from] RasterError),
    #[error("Invalid background colour \"{0}\": expected six hex digits")]
    BadBackground(String),
}

/// Decodes an image file into a colour raster.
pub fn load_raster(path: &Path) -> Result<PixelRaster, ConvertError> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels: Vec<Rgb> = rgb.pixels().map(|pixel| pixel.0).collect();
    Ok(PixelRaster::new(width as usize, height as usize, pixels)?)
}

/// Parses an `rrggbb` hex string, with or without a leading `#`.
pub fn parse_background(raw: &str) -> Result<Rgb, ConvertError> {
    let hex = raw.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(ConvertError::BadBackground(raw.to_string()));
    }
    let channel = |from: usize| {
        u8::from_str_radix(&hex[from..from + 2], 16)
            .map_err(|_| ConvertError::BadBackground(raw.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Derives an output path: output marker prefixed to the file name, with
/// the extension swapped.
pub fn output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("image");
    input.with_file_name(format!("{OUTPUT_PREFIX}{stem}.{extension}"))
}
