//! Error types for GitHub API operations.

use thiserror::Error;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Configuration is missing or incomplete.
    #[error("GitHub configuration required: {0}")]
    ConfigMissing(String),

    /// An identifier passed to an accessor has the wrong shape.
    ///
    /// Raised before any request is sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An attribute was read before any value was assigned to it.
    #[error("{resource}.{field} has not been populated")]
    NotPopulated {
        resource: &'static str,
        field: &'static str,
    },

    /// The server sent a value that does not match the field's type.
    #[error("{resource}.{field}: expected {expected}, got {value}")]
    BadAttribute {
        resource: &'static str,
        field: &'static str,
        expected: &'static str,
        value: serde_json::Value,
    },

    /// Resource not found (HTTP 404).
    #[error("Resource not found: {url}")]
    NotFound { url: String },

    /// API request failed.
    #[error("GitHub API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl GithubError {
    /// HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GithubError::NotFound { .. } => Some(404),
            GithubError::ApiError { status_code, .. } => *status_code,
            GithubError::RateLimited { .. } => Some(429),
            GithubError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error came from the transport or the server, as opposed
    /// to a local misuse of the API.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            GithubError::NotFound { .. }
                | GithubError::ApiError { .. }
                | GithubError::HttpError(_)
                | GithubError::RateLimited { .. }
        )
    }
}

/// Result type alias for GitHub operations.
pub type Result<T> = core::result::Result<T, GithubError>;
