//! Error types for guide ingestion and schedule extraction

use std::path::PathBuf;

use thiserror::Error;

/// Result type for schedule operations
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Guide timestamp that does not match `YYYYMMDDHHMMSS +HHMM`
    #[error("malformed guide timestamp: {raw:?}")]
    MalformedTimestamp { raw: String },

    /// Target channel with no catalog match by id or display name
    #[error("channel not found in guide catalog: {id:?} ({name:?})")]
    ChannelNotFound { id: String, name: String },

    /// Guide source that could not be read or yielded no data
    #[error("guide source unavailable: {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    /// Zone offset string that is not a signed 4-digit `+HHMM` value
    #[error("invalid timezone offset: {0:?}")]
    InvalidTimezone(String),
}
