//! Error types for the quotes client

use thiserror::Error;

/// Result type alias for remote operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures talking to the remote resource
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, timeout)
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// The server answered with a non-success status
    #[error("Server rejected request: HTTP {status}")]
    RemoteRejected { status: u16 },

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An endpoint could not be derived from the configured URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Short label for status lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "unreachable",
            Self::RemoteRejected { .. } => "rejected",
            Self::MalformedResponse(_) => "malformed",
            Self::InvalidUrl(_) => "invalid-url",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::RemoteRejected {
                status: status.as_u16(),
            };
        }
        if err.is_decode() {
            return Self::MalformedResponse(err.to_string());
        }
        Self::Unreachable(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
