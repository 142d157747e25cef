//! Loader program derivation.
//!
//! The loader carries everything a playback routine needs: the full-width
//! palette table scaled to the VDP's three-bit channels, the raster
//! dimensions, and a running-XOR pass mirroring the decoder. The listing
//! syntax below is MSX-BASIC; the data content is the contract.

use log::debug;
use serde::Serialize;

use crate::codec::palette::Palette;

/// One palette entry scaled to the 0-7 channel range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub index: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Data for a target-hardware playback routine.
#[derive(Debug, Clone, Serialize)]
pub struct LoaderScript {
    pub width: u16,
    pub height: u16,
    pub palette: Vec<PaletteEntry>,
}

/// Scales an eight-bit channel into the VDP's 0-7 range, rounding to the
/// nearest step.
pub fn scale_channel(channel: u8) -> u8 {
    ((channel as u16 * 7 + 127) / 255) as u8
}

impl LoaderScript {
    /// Derives the loader data from an encoded image's palette and
    /// dimensions. The palette table is the full-width padded view.
    pub fn new(palette: &Palette, width: u16, height: u16) -> Self {
        let palette = palette
            .padded()
            .iter()
            .enumerate()
            .map(|(index, colour)| PaletteEntry {
                index: index as u8,
                r: scale_channel(colour[0]),
                g: scale_channel(colour[1]),
                b: scale_channel(colour[2]),
            })
            .collect();
        Self {
            width,
            height,
            palette,
        }
    }

    /// Renders the playback program around `binary_name`, the packed
    /// raster file to BLOAD. The inner loop reconstructs each row with the
    /// same running XOR the decoder uses.
    pub fn to_basic(&self, binary_name: &str) -> String {
        debug!("rendering loader for {binary_name}");

        let mut listing = String::new();
        listing.push_str("10 SCREEN 5\n");
        listing.push_str(&format!(
            "20 FOR I=0 TO {}:READ R,G,B:COLOR=(I,R,G,B):NEXT I\n",
            self.palette.len() - 1
        ));
        listing.push_str(&format!("30 BLOAD\"{binary_name}\",S\n"));
        listing.push_str(&format!("40 FOR Y=0 TO {}\n", self.height - 1));
        listing.push_str(&format!("50 FOR X=1 TO {}\n", self.width - 1));
        listing.push_str("60 PSET(X,Y),POINT(X-1,Y) XOR POINT(X,Y)\n");
        listing.push_str("70 NEXT X:NEXT Y\n");
        listing.push_str("80 GOTO 80\n");

        let mut line = 90;
        for entry in &self.palette {
            listing.push_str(&format!("{} DATA {},{},{}\n", line, entry.r, entry.g, entry.b));
            line += 10;
        }
        listing
    }
}
