use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Failed to render {chart}: {message}")]
    Chart { chart: String, message: String },
}

impl ProcessingError {
    pub fn chart(chart: &str, err: impl std::fmt::Display) -> Self {
        ProcessingError::Chart {
            chart: chart.to_string(),
            message: err.to_string(),
        }
    }
}
