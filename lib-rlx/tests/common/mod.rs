use lib_rlx::raster::{PixelRaster, Rgb};

pub const BACKGROUND: Rgb = [0, 0, 0];

/// Sixteen distinct colours with the background first.
pub fn full_palette() -> Vec<Rgb> {
    let mut entries = vec![BACKGROUND];
    for i in 1..16u8 {
        entries.push([i * 16, 255 - i * 16, i]);
    }
    entries
}

/// Two-colour checkerboard.
pub fn checker(width: usize, height: usize, a: Rgb, b: Rgb) -> PixelRaster {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push(if (x + y) % 2 == 0 { a } else { b });
        }
    }
    PixelRaster::new(width, height, pixels).unwrap()
}

/// Horizontal bands cycling through `palette`.
pub fn banded(width: usize, height: usize, palette: &[Rgb]) -> PixelRaster {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let colour = palette[y % palette.len()];
        pixels.extend(std::iter::repeat(colour).take(width));
    }
    PixelRaster::new(width, height, pixels).unwrap()
}

/// Image whose first row is the full sixteen-entry palette, followed by
/// `height` content rows drawn from that palette.
pub fn with_embedded_palette(width: usize, height: usize) -> PixelRaster {
    assert!(width >= 16);
    let palette = full_palette();

    let mut pixels = Vec::with_capacity(width * (height + 1));
    for x in 0..width {
        pixels.push(palette[x % 16]);
    }
    for y in 0..height {
        for x in 0..width {
            pixels.push(palette[(x / 3 + y) % 16]);
        }
    }
    PixelRaster::new(width, height + 1, pixels).unwrap()
}
