use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the meetings pipeline.
#[derive(Error, Debug)]
pub enum MeetingError {
    /// The source table could not be opened or read from disk.
    #[error("Source unavailable {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited file is structurally broken (bad quoting, ragged rows).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is absent from the source file.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A time-of-day field did not match `HH:MM:SS`.
    #[error("Malformed time {value:?} in row {row}")]
    MalformedTime { row: usize, value: String },

    /// A date field did not match `DD/MM/YYYY`.
    #[error("Malformed date {value:?} in row {row}")]
    MalformedDate { row: usize, value: String },

    /// A month value outside the known vocabulary.
    #[error("Unknown month {value:?} in row {row}")]
    UnknownMonth { row: usize, value: String },

    /// A month filter that is neither the sentinel nor a known month.
    #[error("Invalid month filter: {0}")]
    InvalidFilter(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MeetingError {
    /// `true` for errors raised while turning raw fields into typed values.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            MeetingError::MalformedTime { .. }
                | MeetingError::MalformedDate { .. }
                | MeetingError::UnknownMonth { .. }
                | MeetingError::MissingColumn(_)
        )
    }
}

/// Convenience alias used throughout the meetings crates.
pub type Result<T> = std::result::Result<T, MeetingError>;
