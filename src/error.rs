use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// A request record that falls outside the declared input domains.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("unrecognised {field} value {value:?}")]
    UnknownCategory { field: &'static str, value: String },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("{field} is too large: {value}")]
    TooLarge { field: &'static str, value: i64 },

    #[error("curvature must be a finite number in [0, 1], got {0}")]
    CurvatureOutOfRange(f64),
}

/// Startup failures. None of these are recoverable: the service refuses to start.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read {what} at {path}: {source}")]
    Io {
        what: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what} at {path}: {source}")]
    Parse {
        what: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected schema is empty")]
    EmptySchema,

    #[error("expected schema lists {0:?} more than once")]
    DuplicateColumn(String),

    #[error("model weights column {0:?} which is not in the expected schema")]
    UnknownModelColumn(String),

    #[error("invalid {name}: {value:?}")]
    InvalidSetting { name: &'static str, value: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("model expects {expected} features, got {actual}")]
    Dimension { expected: usize, actual: usize },

    #[error("model produced a non-finite score ({0})")]
    NonFinite(f64),

    /// For `Scorer` implementations backed by something that can go away
    /// (a remote model server, a lazily mapped artifact). `LinearModel` is
    /// fully in memory and never returns it.
    #[error("model unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced through the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::InvalidInput(e) => tracing::debug!("rejected request: {}", e),
            ApiError::Scoring(e) => tracing::error!("scoring failed: {}", e),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
