use thiserror::Error;

pub type Result<T> = std::result::Result<T, MoodmapError>;

#[derive(Debug, Error)]
pub enum MoodmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected at least 2 columns, got {got}")]
    CsvRow { row: usize, got: usize },

    #[error("Invalid sentiment at row {row}: {value}")]
    SentimentParse {
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Invalid tweet line {line}: {reason}")]
    TweetLine { line: usize, reason: String },

    #[error("Invalid region data: {0}")]
    RegionData(String),

    #[error("Polygon has no vertices")]
    EmptyPolygon,

    #[error("Region '{name}' has zero total area")]
    DegenerateRegion { name: String },

    #[error("No candidate regions to assign against")]
    EmptyRegionSet,

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<toml::de::Error> for MoodmapError {
    fn from(err: toml::de::Error) -> Self {
        MoodmapError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<serde_json::Error> for MoodmapError {
    fn from(err: serde_json::Error) -> Self {
        MoodmapError::RegionData(format!("JSON error: {}", err))
    }
}
