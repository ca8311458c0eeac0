//! Error types for the bookmark backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookmarksError {
    /// Missing, expired or rejected bearer token.
    #[error("authentication required")]
    Unauthorized,

    #[error("bookmark {0} not found")]
    NotFound(i64),

    /// Any other non-success response.
    #[error("backend returned status {0}")]
    Status(u16),

    /// Transport failure: connect, timeout, TLS.
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl BookmarksError {
    /// Whether the UI should offer a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            BookmarksError::Request(_) => true,
            BookmarksError::Status(code) => *code >= 500 || *code == 408 || *code == 429,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, BookmarksError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(BookmarksError::Request("timeout".into()).is_retryable());
        assert!(BookmarksError::Status(503).is_retryable());
        assert!(BookmarksError::Status(429).is_retryable());
        assert!(!BookmarksError::Status(400).is_retryable());
        assert!(!BookmarksError::Unauthorized.is_retryable());
        assert!(!BookmarksError::NotFound(3).is_retryable());
        assert!(!BookmarksError::Decode("eof".into()).is_retryable());
    }
}
