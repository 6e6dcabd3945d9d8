//! Error types for loading flights and checking seats.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeatStalkerError {
    #[error("failed to read flights file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV framing (bad quoting, invalid UTF-8).
    #[error("failed to parse flights CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid CurrentTier '{value}'")]
    InvalidTier { line: usize, value: String },

    #[error("line {line}: invalid FlightDate '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { line: usize, value: String },

    #[error("failed to serialize alerts: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SeatStalkerError>;
