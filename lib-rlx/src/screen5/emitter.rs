use log::{debug, error, info};
use thiserror::Error;

use crate::constants::VRAM_PAGE;
use crate::raster::IndexRaster;

/// Bytes in the dimension header.
pub const HEADER_LEN: usize = 4;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Odd width {0} cannot be nibble-packed")]
    OddWidth(usize),
    #[error("Index {index} at ({x}, {y}) does not fit in four bits")]
    IndexOutOfRange { index: u8, x: usize, y: usize },
    #[error("Image {width}x{height} does not fit the display page")]
    ImageTooLarge { width: usize, height: usize },
}

/// Packs an index raster into the SCREEN 5 binary layout: a four-byte
/// header (width and height as little-endian u16) followed by two indices
/// per byte, first pixel in the high nibble.
///
/// # Errors
/// - Returns `EmitError::OddWidth` for widths that cannot pair up
/// - Returns `EmitError::IndexOutOfRange` for indices above 15
/// - Returns `EmitError::ImageTooLarge` when the dimensions overflow a u16
///   or the pixel stream exceeds one display page
pub fn emit(raster: &IndexRaster) -> Result<Vec<u8>, EmitError> {
    info!("Starting binary emission");

    let width = raster.width();
    let height = raster.height();

    if width % 2 != 0 {
        error!("cannot pack odd width {width}");
        return Err(EmitError::OddWidth(width));
    }

    let pixel_bytes = width / 2 * height;
    if width > u16::MAX as usize || height > u16::MAX as usize || pixel_bytes > VRAM_PAGE {
        error!("image {width}x{height} exceeds the display page");
        return Err(EmitError::ImageTooLarge { width, height });
    }

    let mut packed = Vec::with_capacity(HEADER_LEN + pixel_bytes);
    packed.extend_from_slice(&(width as u16).to_le_bytes());
    packed.extend_from_slice(&(height as u16).to_le_bytes());
    debug!("Header written: width={width} height={height}");

    for (y, row) in raster.rows().enumerate() {
        for (pair, chunk) in row.chunks_exact(2).enumerate() {
            let x = pair * 2;
            let (high, low) = (chunk[0], chunk[1]);
            if high > 0x0f {
                error!("index {high} at ({x}, {y}) out of nibble range");
                return Err(EmitError::IndexOutOfRange { index: high, x, y });
            }
            if low > 0x0f {
                error!("index {low} at ({}, {y}) out of nibble range", x + 1);
                return Err(EmitError::IndexOutOfRange {
                    index: low,
                    x: x + 1,
                    y,
                });
            }
            packed.push(high << 4 | low);
        }
    }

    info!("Binary emission completed: {} bytes", packed.len());
    Ok(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_nibble_packing() {
        let raster = IndexRaster::new(4, 1, vec![1, 2, 3, 4]).unwrap();
        let packed = emit(&raster).unwrap();
        assert_eq!(packed, vec![0x04, 0x00, 0x01, 0x00, 0x12, 0x34]);
    }

    #[test]
    fn test_emit_header_split_bytes() {
        let raster = IndexRaster::new(260, 1, vec![0; 260]).unwrap();
        let packed = emit(&raster).unwrap();
        assert_eq!(&packed[..HEADER_LEN], &[0x04, 0x01, 0x01, 0x00]);
        assert_eq!(packed.len(), HEADER_LEN + 130);
    }

    #[test]
    fn test_emit_odd_width() {
        let raster = IndexRaster::new(3, 1, vec![1, 2, 3]).unwrap();
        assert!(matches!(emit(&raster), Err(EmitError::OddWidth(3))));
    }

    #[test]
    fn test_emit_index_out_of_range() {
        let raster = IndexRaster::new(2, 1, vec![1, 16]).unwrap();
        assert!(matches!(
            emit(&raster),
            Err(EmitError::IndexOutOfRange { index: 16, x: 1, y: 0 })
        ));
    }

    #[test]
    fn test_emit_page_overflow() {
        let raster = IndexRaster::new(512, 200, vec![0; 512 * 200]).unwrap();
        assert!(matches!(
            emit(&raster),
            Err(EmitError::ImageTooLarge { width: 512, height: 200 })
        ));
    }

    #[test]
    fn test_emit_full_page_fits() {
        let raster = IndexRaster::new(256, 256, vec![0; 256 * 256]).unwrap();
        let packed = emit(&raster).unwrap();
        assert_eq!(packed.len(), HEADER_LEN + VRAM_PAGE);
    }
}
