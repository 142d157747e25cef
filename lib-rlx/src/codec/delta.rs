//! Row-oriented XOR delta transform over palette indices.
//!
//! Encode reads only the untouched input row and writes a fresh buffer:
//! overwriting in place would feed already-encoded values back into the
//! transform. Decode is the opposite: each pixel needs the already
//! reconstructed value to its left, so it runs in place, left to right.

use crate::raster::IndexRaster;

/// Encodes one row: `encoded[0] = row[0]`, then each value XORed with its
/// left neighbour.
pub fn encode_row(row: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(row.len());
    if let Some((&first, rest)) = row.split_first() {
        encoded.push(first);
        let mut prev = first;
        for &value in rest {
            encoded.push(prev ^ value);
            prev = value;
        }
    }
    encoded
}

/// Decodes one row in place via a running XOR of everything to the left.
pub fn decode_row(row: &mut [u8]) {
    for x in 1..row.len() {
        row[x] ^= row[x - 1];
    }
}

/// Encodes the raster row by row into a fresh buffer.
///
/// Rows before `first_row` (an embedded palette row) are carried through
/// unchanged.
pub fn encode(raster: &IndexRaster, first_row: usize) -> IndexRaster {
    let mut data = Vec::with_capacity(raster.data().len());
    for (y, row) in raster.rows().enumerate() {
        if y < first_row {
            data.extend_from_slice(row);
        } else {
            data.extend(encode_row(row));
        }
    }
    IndexRaster::from_parts(raster.width(), raster.height(), data)
}

/// Reverses `encode` in place, row by row.
pub fn decode(raster: &mut IndexRaster, first_row: usize) {
    for row in raster.rows_mut().skip(first_row) {
        decode_row(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_known_row() {
        assert_eq!(encode_row(&[5, 5, 2, 2]), vec![5, 0, 7, 0]);

        let mut row = [5, 0, 7, 0];
        decode_row(&mut row);
        assert_eq!(row, [5, 5, 2, 2]);
    }

    #[test]
    fn test_delta_single_pixel_row() {
        assert_eq!(encode_row(&[9]), vec![9]);

        let mut row = [9];
        decode_row(&mut row);
        assert_eq!(row, [9]);
    }

    #[test]
    fn test_delta_empty_row() {
        assert!(encode_row(&[]).is_empty());
    }

    #[test]
    fn test_delta_round_trip() {
        let original = [0, 1, 2, 3, 3, 3, 15, 0, 7, 7];
        let mut row = encode_row(&original);
        decode_row(&mut row);
        assert_eq!(row, original);
    }

    #[test]
    fn test_encode_reads_only_input() {
        let row = [3, 3, 7, 7, 3];
        let first = encode_row(&row);
        let second = encode_row(&row);
        assert_eq!(first, second);
        // the input row itself is untouched
        assert_eq!(row, [3, 3, 7, 7, 3]);
    }

    #[test]
    fn test_raster_round_trip() {
        let raster = IndexRaster::new(4, 3, vec![
            1, 1, 2, 2,
            0, 15, 0, 15,
            7, 7, 7, 7,
        ])
        .unwrap();

        let mut encoded = encode(&raster, 0);
        assert_eq!(encoded.row(0), &[1, 0, 3, 0]);
        assert_eq!(encoded.row(2), &[7, 0, 0, 0]);

        decode(&mut encoded, 0);
        assert_eq!(encoded, raster);
    }

    #[test]
    fn test_raster_palette_row_untouched() {
        let raster = IndexRaster::new(4, 2, vec![
            0, 1, 2, 3,
            5, 5, 5, 5,
        ])
        .unwrap();

        let mut encoded = encode(&raster, 1);
        assert_eq!(encoded.row(0), &[0, 1, 2, 3]);
        assert_eq!(encoded.row(1), &[5, 0, 0, 0]);

        decode(&mut encoded, 1);
        assert_eq!(encoded, raster);
    }
}
