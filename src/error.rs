use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Cannot read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("Cannot open Excel file: {0}")]
    Excel(#[from] calamine::Error),
    #[error("Malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),
    #[error("No header row found and {0} columns do not match the wine layout")]
    MissingHeader(usize),
    #[error("No data found in file")]
    EmptySheet,
}

pub type Result<T> = std::result::Result<T, StatsError>;
