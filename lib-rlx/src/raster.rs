use thiserror::Error;

/// A colour as it arrives from the image decoder.
pub type Rgb = [u8; 3];

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Invalid pixel data length: expected {expected} pixels for {width}x{height}, got {got}")]
    InvalidPixelDataLength {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
    #[error("Raster dimensions must be at least 1x1, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
}

/// Row-major colour raster, as supplied by the image-codec boundary.
#[derive(Debug, Clone)]
pub struct PixelRaster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelRaster {
    /// Validates that `pixels` holds exactly `width * height` entries.
    ///
    /// # Errors
    /// - Returns `RasterError::EmptyDimensions` if either dimension is zero
    /// - Returns `RasterError::InvalidPixelDataLength` on a length mismatch
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        if pixels.len() != expected {
            return Err(RasterError::InvalidPixelDataLength {
                width,
                height,
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, Rgb> {
        self.pixels.chunks_exact(self.width)
    }
}

/// Row-major raster of palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRaster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl IndexRaster {
    /// Validates that `data` holds exactly `width * height` indices.
    ///
    /// # Errors
    /// - Returns `RasterError::EmptyDimensions` if either dimension is zero
    /// - Returns `RasterError::InvalidPixelDataLength` on a length mismatch
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(RasterError::InvalidPixelDataLength {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Length invariant already established by the caller.
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.width)
    }

    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.width)
    }
}
