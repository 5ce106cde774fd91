//! Error types for the airdash application.
//!
//! Every fallible operation returns [`AirdashError`]. The variants are grouped
//! into the coarse [`FailureKind`] taxonomy that the dashboard uses to decide
//! whether a failure is shown as an "unavailable" panel, dropped per record,
//! or rejected as a bad request.

use serde::Serialize;
use thiserror::Error;

/// The main error type for airdash operations.
#[derive(Error, Debug)]
pub enum AirdashError {
    /// Transport or HTTP status errors talking to the upstream API
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream envelope carried a non-success result code
    #[error("Upstream API error: {code} - {message}")]
    Upstream { code: String, message: String },

    /// A valid response that contained nothing usable
    #[error("No data: {message}")]
    EmptyResult { message: String },

    /// A malformed individual field or record
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid request parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

/// Coarse classification of an [`AirdashError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Request/transport failure or an upstream error response
    NetworkFailure,
    /// Valid response, zero usable items
    EmptyResult,
    /// A single malformed field or record
    ParseFailure,
    /// The caller sent a bad request
    Request,
    /// Local configuration, IO or server problems
    Internal,
}

impl AirdashError {
    /// Shorthand for a [`AirdashError::Parse`] error.
    pub fn parse(message: impl Into<String>) -> Self {
        AirdashError::Parse {
            message: message.into(),
        }
    }

    /// Shorthand for an [`AirdashError::InvalidParameter`] error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        AirdashError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Classify this error for presentation.
    ///
    /// A body that fails to decode as JSON came from the upstream service,
    /// so it counts as a network failure rather than a per-record one.
    pub fn kind(&self) -> FailureKind {
        match self {
            AirdashError::Network(_) | AirdashError::Upstream { .. } | AirdashError::Json(_) => {
                FailureKind::NetworkFailure
            }
            AirdashError::EmptyResult { .. } => FailureKind::EmptyResult,
            AirdashError::Parse { .. } => FailureKind::ParseFailure,
            AirdashError::InvalidParameter { .. } => FailureKind::Request,
            AirdashError::Io(_) | AirdashError::Config { .. } | AirdashError::Server { .. } => {
                FailureKind::Internal
            }
        }
    }
}

/// Convenience type alias for Results with AirdashError
pub type Result<T> = std::result::Result<T, AirdashError>;
