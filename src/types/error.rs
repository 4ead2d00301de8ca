//! Error types

use thiserror::Error;

/// Failure of a metric request or of a whole fetch cycle
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("range out of bounds: {0} days")]
    InvalidRange(u32),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {path} failed: {message}")]
    Network { path: String, message: String },

    #[error("request to {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("response from {path} is not JSON: {message}")]
    Body { path: String, message: String },
}

impl FetchError {
    pub fn network(path: impl Into<String>, message: impl ToString) -> Self {
        FetchError::Network { path: path.into(), message: message.to_string() }
    }

    pub fn status(path: impl Into<String>, status: u16) -> Self {
        FetchError::Status { path: path.into(), status }
    }

    /// Short text for the user-facing notice
    pub fn notice_text(&self) -> String {
        match self {
            FetchError::InvalidRange(days) => format!("Invalid range: {} days", days),
            _ => "Failed to load analytics data. Please try again.".to_string(),
        }
    }
}

/// Failure saving or loading a snapshot file
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("snapshot storage failed: {0}")]
    Storage(#[from] std::io::Error),
}

/// Failure loading emotion records for the aggregation service
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("cannot read records file {path}: {source}")]
    Read { path: String, source: std::io::Error },

    #[error("records file {path} is malformed: {source}")]
    Parse { path: String, source: serde_json::Error },
}
