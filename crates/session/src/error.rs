//! Error types for session tracking and control.

use thiserror::Error;

/// Failures talking to the platform session service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Notification access has not been granted to the app.
    #[error("notification access not granted - enable it in system notification settings")]
    PermissionDenied,

    /// The platform session service could not be reached.
    #[error("media session service unavailable: {0}")]
    SourceUnavailable(String),
}

/// A transport command sent to another app's session failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("transport command rejected: {0}")]
    Rejected(String),

    #[error("session for {0} is gone")]
    Disconnected(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
