use std::collections::HashSet;

use log::{debug, error};
use thiserror::Error;

use crate::raster::PixelRaster;

#[derive(Error, Debug)]
#[error("Colour budget exceeded: {found} distinct colours, limit is {max_colours}")]
pub struct BudgetExceeded {
    pub found: usize,
    pub max_colours: usize,
}

/// Scans the pixel region once and counts distinct colours.
///
/// `first_row` excludes an embedded palette row from the scan. Runs before
/// the transform so a rejected image produces no output at all.
///
/// # Errors
/// - Returns `BudgetExceeded` if the distinct count is above `max_colours`
pub fn check_colour_budget(
    raster: &PixelRaster,
    first_row: usize,
    max_colours: usize,
) -> Result<usize, BudgetExceeded> {
    let mut seen = HashSet::new();
    for row in raster.rows().skip(first_row) {
        for &pixel in row {
            seen.insert(pixel);
        }
    }

    if seen.len() > max_colours {
        error!(
            "number of colours exceeded: {} found, {} allowed",
            seen.len(),
            max_colours
        );
        return Err(BudgetExceeded {
            found: seen.len(),
            max_colours,
        });
    }

    debug!("colour budget ok: {} of {max_colours} used", seen.len());
    Ok(seen.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgb;

    fn raster_with_colours(colours: &[Rgb]) -> PixelRaster {
        PixelRaster::new(colours.len(), 1, colours.to_vec()).unwrap()
    }

    #[test]
    fn test_budget_within_limit() {
        let raster = raster_with_colours(&[[1, 0, 0], [2, 0, 0], [1, 0, 0]]);
        assert_eq!(check_colour_budget(&raster, 0, 2).unwrap(), 2);
    }

    #[test]
    fn test_budget_exceeded() {
        let raster = raster_with_colours(&[[1, 0, 0], [2, 0, 0], [3, 0, 0]]);
        let result = check_colour_budget(&raster, 0, 2);
        assert!(matches!(result, Err(BudgetExceeded { found: 3, max_colours: 2 })));
    }

    #[test]
    fn test_budget_skips_palette_row() {
        // row 0 holds four distinct colours, the content row only two
        let raster = PixelRaster::new(4, 2, vec![
            [0, 0, 0], [1, 0, 0], [2, 0, 0], [3, 0, 0],
            [1, 0, 0], [1, 0, 0], [2, 0, 0], [2, 0, 0],
        ])
        .unwrap();
        assert_eq!(check_colour_budget(&raster, 1, 2).unwrap(), 2);
        assert!(check_colour_budget(&raster, 0, 2).is_err());
    }
}
