//! Platform seams for media session access.
//!
//! These traits abstract the OS session service so the tracker can be
//! driven by a real binding or by [`crate::fake`] in tests.

use crate::error::{ControlError, SessionError};
use poma_media::{extract, Extraction, MetadataReader, PlaybackReader};
use std::sync::Arc;

/// One active platform media session, owned by another app.
pub trait MediaSession: Send + Sync {
    /// Package of the owning app.
    fn app_id(&self) -> &str;

    /// Current metadata bundle, `None` when the session has none.
    fn metadata(&self) -> Option<Arc<dyn MetadataReader>>;

    /// Current playback state, `None` when the session has none.
    fn playback(&self) -> Option<Arc<dyn PlaybackReader>>;

    /// Ask the owning app to seek. May block on IPC.
    fn seek_to(&self, position_ms: u64) -> Result<(), ControlError>;

    /// Ask the owning app to start playing. May block on IPC.
    fn play(&self) -> Result<(), ControlError>;

    /// Read metadata and playback state into an [`Extraction`].
    fn extract(&self) -> Extraction {
        let metadata = self.metadata();
        let playback = self.playback();
        extract(self.app_id(), metadata.as_deref(), playback.as_deref())
    }
}

/// Shared handle to a platform session.
pub type SessionHandle = Arc<dyn MediaSession>;

/// Called with the full new list whenever the set of active sessions changes.
pub type ActiveSessionsListener = Arc<dyn Fn(Vec<SessionHandle>) + Send + Sync + 'static>;

/// Called with the app id whenever a session's metadata or playback state changes.
pub type SessionListener = Arc<dyn Fn(&str) + Send + Sync + 'static>;

/// The platform media session service.
pub trait SessionSource: Send + Sync {
    /// Whether the user granted notification access. Queried on demand.
    fn has_notification_access(&self) -> bool;

    /// Sessions currently active on the device.
    fn active_sessions(&self) -> Result<Vec<SessionHandle>, SessionError>;

    /// Register the listener for active-session list changes, replacing any
    /// previous one.
    fn subscribe_active_sessions(&self, listener: ActiveSessionsListener)
        -> Result<(), SessionError>;

    /// Register the per-session change listener, replacing any previous
    /// one for the same app.
    fn subscribe_session(&self, session: &SessionHandle, listener: SessionListener);

    /// Drop the per-session listener for an app.
    fn unsubscribe_session(&self, app_id: &str);
}

/// Source for platforms without media session access.
pub struct NullSource;

impl SessionSource for NullSource {
    fn has_notification_access(&self) -> bool {
        false
    }

    fn active_sessions(&self) -> Result<Vec<SessionHandle>, SessionError> {
        Err(SessionError::PermissionDenied)
    }

    fn subscribe_active_sessions(
        &self,
        _listener: ActiveSessionsListener,
    ) -> Result<(), SessionError> {
        Err(SessionError::PermissionDenied)
    }

    fn subscribe_session(&self, _session: &SessionHandle, _listener: SessionListener) {}

    fn unsubscribe_session(&self, _app_id: &str) {}
}
