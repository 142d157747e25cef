/// Default palette budget for a four-bit raster plane.
pub const DEFAULT_MAX_COLOURS: usize = 16;

/// Background colour reserved at index 0 unless overridden.
pub const DEFAULT_BACKGROUND: [u8; 3] = [0, 0, 0];

/// Filler colour used to right-pad short palettes to the full table width.
pub const FILLER_COLOUR: [u8; 3] = [0, 0, 0];

/// Bytes addressable by one SCREEN 5 display page.
pub const VRAM_PAGE: usize = 0x8000;

/// Prefix added to every output file name.
pub const OUTPUT_PREFIX: &str = "p_";

/// Extension of the packed raster output.
pub const BINARY_EXTENSION: &str = "sc5";

/// Extension of the loader program output.
pub const LOADER_EXTENSION: &str = "bas";
