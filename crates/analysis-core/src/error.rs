use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No data available: {0}")]
    DataUnavailable(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}
