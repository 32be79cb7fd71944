use thiserror::Error;

/// Application error types.
///
/// Every variant is fatal for a pipeline run; nothing is retried.
#[derive(Error, Debug)]
pub enum AppError {
    /// Market data source unreachable, or a forecast file could not be opened.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Unparseable date or price, missing column, too few rows or a bad setting.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Not enough real closes to define a moving average before projecting.
    #[error("Insufficient history: need at least {required} points, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error(transparent)]
    Terminal(#[from] std::io::Error),
}

impl AppError {
    /// Short category label shown in the dashboard status bar.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DataUnavailable(_) => "data unavailable",
            AppError::MalformedInput(_) => "malformed input",
            AppError::InsufficientHistory { .. } => "insufficient history",
            AppError::Terminal(_) => "terminal",
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            AppError::DataUnavailable(e.to_string())
        } else {
            AppError::MalformedInput(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::MalformedInput(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
