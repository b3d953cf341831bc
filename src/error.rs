use thiserror::Error;

/// Why a snapshot could not be loaded.
///
/// Holders never return this from accessors; it is kept only as a
/// diagnostic via `last_error()`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP client could not be constructed (e.g. TLS backend init).
    #[error("HTTP client unavailable: {0}")]
    Client(String),
    /// The request could not be sent or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returned a non-success status code
    #[error("Status error: {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// The body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// The body was valid JSON but the top-level value had the wrong shape.
    #[error("Unexpected shape from {url}: expected {expected}, got {found}")]
    UnexpectedShape {
        url: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, HTTP or client-construction failure.
    Fetch,
    /// The response body was not a JSON document of the expected shape.
    Decode,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Client(_) | ApiError::Transport(_) | ApiError::Status { .. } => {
                ErrorKind::Fetch
            }
            ApiError::Decode(_) | ApiError::UnexpectedShape { .. } => ErrorKind::Decode,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
