use std::collections::{HashMap, HashSet};

use log::{debug, error};
use thiserror::Error;

use crate::constants::FILLER_COLOUR;
use crate::raster::{PixelRaster, Rgb};

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Colour {colour:?} registered twice: indices {first} and {second} both claim it")]
    DuplicateColour { colour: Rgb, first: u8, second: u8 },
    #[error("Palette full, cannot reserve background slot for {background:?} ({max_colours} colour limit)")]
    Full { background: Rgb, max_colours: usize },
    #[error("Declared palette holds {got} colours, limit is {max_colours}")]
    TooManyColours { got: usize, max_colours: usize },
    #[error("Embedded palette row holds {width} pixels, scan region needs {max_colours}")]
    EmbeddedRowTooShort { width: usize, max_colours: usize },
}

/// Ordered palette with index 0 reserved for the background colour.
///
/// Hardware renders index 0 with visible edge artifacts, so construction
/// renumbers the entries until the background sits there.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<Rgb>,
    max_colours: usize,
}

impl Palette {
    /// Builds the palette from declared entries and reserves index 0.
    ///
    /// If `background` already has an index, that entry and index 0 swap
    /// places. If it is absent and a slot is free, it is appended and
    /// swapped to the front.
    ///
    /// # Errors
    /// - Returns `PaletteError::TooManyColours` if `entries` exceeds `max_colours`
    /// - Returns `PaletteError::DuplicateColour` if one colour claims two indices
    /// - Returns `PaletteError::Full` if no slot is left for `background`
    pub fn new(
        entries: Vec<Rgb>,
        background: Rgb,
        max_colours: usize,
    ) -> Result<Self, PaletteError> {
        if entries.len() > max_colours {
            error!(
                "declared palette has {} colours, limit is {}",
                entries.len(),
                max_colours
            );
            return Err(PaletteError::TooManyColours {
                got: entries.len(),
                max_colours,
            });
        }

        let mut positions: HashMap<Rgb, u8> = HashMap::with_capacity(entries.len());
        for (index, &colour) in entries.iter().enumerate() {
            if let Some(&first) = positions.get(&colour) {
                error!("{index} index already registered ({colour:?})");
                return Err(PaletteError::DuplicateColour {
                    colour,
                    first,
                    second: index as u8,
                });
            }
            positions.insert(colour, index as u8);
        }

        let mut entries = entries;
        match positions.get(&background) {
            Some(&0) => {}
            Some(&at) => {
                debug!("background found at index {at}, swapping with index 0");
                entries.swap(0, at as usize);
            }
            None => {
                if entries.len() >= max_colours {
                    error!("palette full, cannot reserve background slot");
                    return Err(PaletteError::Full {
                        background,
                        max_colours,
                    });
                }
                entries.push(background);
                let freed = entries.len() - 1;
                entries.swap(0, freed);
            }
        }

        Ok(Self {
            entries,
            max_colours,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_colours(&self) -> usize {
        self.max_colours
    }

    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }

    /// Full-width table, right-padded with the filler colour.
    ///
    /// Downstream hardware and tools assume `max_colours` entries; the
    /// padding never enters the index map.
    pub fn padded(&self) -> Vec<Rgb> {
        let mut table = self.entries.clone();
        table.resize(self.max_colours, FILLER_COLOUR);
        table
    }

    pub fn index_map(&self) -> IndexMap {
        IndexMap::from_entries(&self.entries)
    }
}

/// Immutable bijection between palette colours and dense indices.
#[derive(Debug)]
pub struct IndexMap {
    forward: HashMap<Rgb, u8>,
    reverse: Vec<Rgb>,
}

impl IndexMap {
    fn from_entries(entries: &[Rgb]) -> Self {
        let mut forward = HashMap::with_capacity(entries.len());
        for (index, &colour) in entries.iter().enumerate() {
            forward.insert(colour, index as u8);
        }
        Self {
            forward,
            reverse: entries.to_vec(),
        }
    }

    pub fn index_of(&self, colour: Rgb) -> Option<u8> {
        self.forward.get(&colour).copied()
    }

    pub fn colour_of(&self, index: u8) -> Option<Rgb> {
        self.reverse.get(index as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}

/// Reads the palette from the first `max_colours` pixels of row 0.
///
/// # Errors
/// - Returns `PaletteError::EmbeddedRowTooShort` if the row cannot hold the
///   scan region
pub fn scan_embedded(raster: &PixelRaster, max_colours: usize) -> Result<Vec<Rgb>, PaletteError> {
    if raster.width() < max_colours {
        error!(
            "embedded palette row holds {} pixels, need {}",
            raster.width(),
            max_colours
        );
        return Err(PaletteError::EmbeddedRowTooShort {
            width: raster.width(),
            max_colours,
        });
    }
    Ok(raster.row(0)[..max_colours].to_vec())
}

/// Collects the palette from pixel data in first-seen scan order.
pub fn collect_colours(raster: &PixelRaster, first_row: usize) -> Vec<Rgb> {
    let mut known = HashSet::new();
    let mut entries = Vec::new();
    for row in raster.rows().skip(first_row) {
        for &pixel in row {
            if known.insert(pixel) {
                entries.push(pixel);
            }
        }
    }
    debug!("collected {} colours from pixel data", entries.len());
    entries
}
