pub mod budget;
pub mod delta;
pub mod palette;
pub mod runs;

use log::{debug, error, info};
use thiserror::Error;

use budget::BudgetExceeded;
use palette::{IndexMap, Palette, PaletteError};
use runs::EdgeTable;

use crate::constants::{DEFAULT_BACKGROUND, DEFAULT_MAX_COLOURS};
use crate::raster::{IndexRaster, PixelRaster, Rgb};

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Palette indexing failed: {0}")]
    Palette(#[from] PaletteError),
    #[error("Colour budget check failed: {0}")]
    Budget(#[from] BudgetExceeded),
    #[error("Colour {colour:?} at ({x}, {y}) not found in the index map")]
    IndexNotFound { colour: Rgb, x: usize, y: usize },
}

/// Per-image encoding settings.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Palette budget; a power of two.
    pub max_colours: usize,
    /// Treat the first row as an embedded palette.
    pub contains_palette: bool,
    /// Colour reserved at index 0.
    pub background: Rgb,
    /// Erase run interiors after the transform and record edge statistics.
    pub erase_runs: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_colours: DEFAULT_MAX_COLOURS,
            contains_palette: false,
            background: DEFAULT_BACKGROUND,
            erase_runs: false,
        }
    }
}

/// Everything produced for one image.
///
/// Each image owns its palette and statistics, so independent images can be
/// processed in parallel without shared state.
#[derive(Debug)]
pub struct EncodedImage {
    pub raster: IndexRaster,
    pub palette: Palette,
    pub edges: EdgeTable,
}

/// Runs the full forward pipeline for one image: colour budget check,
/// palette indexing, per-row XOR delta transform, and the optional run
/// pass.
///
/// The palette comes from `declared_palette` when given, from the first
/// raster row in embedded mode, and from a first-seen pixel scan otherwise.
/// Nothing is produced for an image that fails any stage.
///
/// # Errors
/// - Returns `EncodeError::Budget` if the raster uses too many colours
/// - Returns `EncodeError::Palette` on duplicate, oversize, or unreservable palettes
/// - Returns `EncodeError::IndexNotFound` if a pixel colour has no palette entry
pub fn encode(
    pixels: &PixelRaster,
    declared_palette: Option<&[Rgb]>,
    options: &EncodeOptions,
) -> Result<EncodedImage, EncodeError> {
    info!("Starting encoding");
    debug_assert!(options.max_colours.is_power_of_two());

    let first_row = if options.contains_palette { 1 } else { 0 };
    debug!("image palette: {}", options.contains_palette);

    // Budget first: an over-budget image must not reach the transform.
    let distinct = budget::check_colour_budget(pixels, first_row, options.max_colours)?;
    debug!("{distinct} distinct colours within budget");

    let entries = match declared_palette {
        Some(declared) => declared.to_vec(),
        None if options.contains_palette => palette::scan_embedded(pixels, options.max_colours)?,
        None => palette::collect_colours(pixels, first_row),
    };
    let palette = Palette::new(entries, options.background, options.max_colours)?;
    let index_map = palette.index_map();
    debug!("index map built with {} entries", index_map.len());

    let indices = map_to_indices(pixels, &index_map)?;
    let mut encoded = delta::encode(&indices, first_row);
    debug!("delta transform complete");

    let mut edges = EdgeTable::default();
    if options.erase_runs {
        for row in encoded.rows_mut().skip(first_row) {
            runs::erase_runs(row, &mut edges);
        }
        debug!("run pass recorded {} edge pairs", edges.len());
    }

    info!("Encoding completed successfully");
    Ok(EncodedImage {
        raster: encoded,
        palette,
        edges,
    })
}

/// Rebuilds the original indices from a delta-encoded raster, in place.
///
/// Independent of the forward pipeline: only the raster and the embedded
/// palette flag are needed.
pub fn decode(raster: &mut IndexRaster, contains_palette: bool) {
    info!("Starting decoding");
    let first_row = if contains_palette { 1 } else { 0 };
    delta::decode(raster, first_row);
    info!("Decoding completed successfully");
}

fn map_to_indices(
    pixels: &PixelRaster,
    index_map: &IndexMap,
) -> Result<IndexRaster, EncodeError> {
    let mut data = Vec::with_capacity(pixels.width() * pixels.height());
    for (y, row) in pixels.rows().enumerate() {
        for (x, &colour) in row.iter().enumerate() {
            match index_map.index_of(colour) {
                Some(index) => data.push(index),
                None => {
                    error!("colour at ({x}, {y}) not found");
                    return Err(EncodeError::IndexNotFound { colour, x, y });
                }
            }
        }
    }
    Ok(IndexRaster::from_parts(
        pixels.width(),
        pixels.height(),
        data,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = [0, 0, 0];
    const RED: Rgb = [255, 0, 0];
    const GREEN: Rgb = [0, 255, 0];

    fn options() -> EncodeOptions {
        EncodeOptions::default()
    }

    #[test]
    fn test_encode_with_declared_palette() {
        let pixels = PixelRaster::new(4, 1, vec![RED, RED, GREEN, GREEN]).unwrap();
        let encoded = encode(&pixels, Some(&[BLACK, RED, GREEN]), &options()).unwrap();

        // red = 1, green = 2: delta row is [1, 0, 3, 0]
        assert_eq!(encoded.raster.row(0), &[1, 0, 3, 0]);
        assert_eq!(encoded.palette.entries()[0], BLACK);
        assert!(encoded.edges.is_empty());
    }

    #[test]
    fn test_encode_budget_exceeded() {
        let mut pixels = Vec::new();
        for i in 0..17 {
            pixels.push([i as u8, 0, 0]);
        }
        let raster = PixelRaster::new(17, 1, pixels).unwrap();
        let result = encode(&raster, None, &options());
        assert!(matches!(result, Err(EncodeError::Budget(_))));
    }

    #[test]
    fn test_encode_missing_palette_entry() {
        let pixels = PixelRaster::new(2, 1, vec![RED, GREEN]).unwrap();
        let result = encode(&pixels, Some(&[BLACK, RED]), &options());
        assert!(matches!(
            result,
            Err(EncodeError::IndexNotFound { x: 1, y: 0, .. })
        ));
    }

    #[test]
    fn test_encode_decode_pipeline() {
        let pixels = PixelRaster::new(4, 2, vec![
            RED, RED, GREEN, RED,
            GREEN, GREEN, GREEN, RED,
        ])
        .unwrap();
        let encoded = encode(&pixels, None, &options()).unwrap();

        let mut decoded = encoded.raster.clone();
        decode(&mut decoded, false);

        let map = encoded.palette.index_map();
        for (decoded_row, pixel_row) in decoded.rows().zip(pixels.rows()) {
            for (&index, &colour) in decoded_row.iter().zip(pixel_row.iter()) {
                assert_eq!(map.colour_of(index), Some(colour));
            }
        }
    }

    #[test]
    fn test_encode_run_pass() {
        let pixels = PixelRaster::new(5, 1, vec![RED, RED, RED, RED, GREEN]).unwrap();
        let mut opts = options();
        opts.erase_runs = true;
        let encoded = encode(&pixels, Some(&[BLACK, RED, GREEN]), &opts).unwrap();

        // delta row [1, 0, 0, 0, 3]: zero run interior erased to the sentinel
        assert_eq!(encoded.raster.row(0), &[1, 0, 0, 0, 3]);
        assert_eq!(encoded.edges.len(), 2);
    }
}
