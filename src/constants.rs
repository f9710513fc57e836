/// Mean radius of the earth in miles, used for great-circle distances.
pub const EARTH_RADIUS_MILES: f64 = 3963.2;

/// Expected headers in sentiment CSV files
pub const EXPECTED_WORD_HEADER: &str = "word"; // word column header
pub const EXPECTED_SENTIMENT_HEADER: &str = "sentiment"; // sentiment column header

/// Canvas defaults (pixels)
pub const DEFAULT_CANVAS_WIDTH: u32 = 960;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;
pub const DEFAULT_CANVAS_MARGIN: u32 = 20;
pub const DEFAULT_DOT_RADIUS: u32 = 3;

/// Font size for region labels (pixels)
pub const LABEL_FONT_SIZE: f64 = 14.0;
