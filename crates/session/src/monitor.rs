//! Wires a [`SessionSource`] to a [`SessionTracker`].

use crate::error::{Result, SessionError};
use crate::source::{ActiveSessionsListener, SessionHandle, SessionListener, SessionSource};
use crate::tracker::SessionTracker;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Subscribes to platform callbacks and feeds them into the tracker.
///
/// Listeners hold only weak references, so dropping the monitor and the
/// tracker is enough to stop processing callbacks.
pub struct SessionMonitor {
    tracker: Arc<SessionTracker>,
    source: Arc<dyn SessionSource>,
    attached: AtomicBool,
}

impl SessionMonitor {
    pub fn new(tracker: Arc<SessionTracker>, source: Arc<dyn SessionSource>) -> Self {
        Self {
            tracker,
            source,
            attached: AtomicBool::new(false),
        }
    }

    /// Whether the active-session listener is registered.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    pub fn tracker(&self) -> &Arc<SessionTracker> {
        &self.tracker
    }

    /// Register for active-session changes and load the initial list.
    pub fn start(&self) -> Result<()> {
        if !self.check_permission() {
            tracing::warn!("notification access not granted, media sessions unavailable");
            return Err(SessionError::PermissionDenied);
        }

        let tracker = Arc::downgrade(&self.tracker);
        let source = Arc::downgrade(&self.source);
        let listener: ActiveSessionsListener = Arc::new(move |sessions| {
            let (Some(tracker), Some(source)) = (tracker.upgrade(), source.upgrade()) else {
                return;
            };
            sync_sessions(&tracker, source.as_ref(), sessions);
        });
        self.source.subscribe_active_sessions(listener)?;
        self.attached.store(true, Ordering::SeqCst);

        let initial = self.source.active_sessions()?;
        tracing::info!(count = initial.len(), "media session monitoring started");
        sync_sessions(&self.tracker, self.source.as_ref(), initial);
        Ok(())
    }

    /// Query notification access and publish it. Revocation clears the tracker.
    pub fn check_permission(&self) -> bool {
        let granted = self.source.has_notification_access();
        let changed = self.tracker.set_permission(granted);
        if changed && !granted {
            self.attached.store(false, Ordering::SeqCst);
            self.tracker.clear();
        }
        granted
    }

    /// Re-query the active list. Used as a safety net for missed callbacks.
    ///
    /// Attaches first if access was granted since the last attempt.
    pub fn reconcile(&self) -> Result<()> {
        if !self.is_attached() {
            return self.start();
        }
        if !self.check_permission() {
            return Err(SessionError::PermissionDenied);
        }
        let sessions = self.source.active_sessions()?;
        sync_sessions(&self.tracker, self.source.as_ref(), sessions);
        Ok(())
    }
}

fn sync_sessions(
    tracker: &Arc<SessionTracker>,
    source: &dyn SessionSource,
    sessions: Vec<SessionHandle>,
) {
    let listed: BTreeSet<&str> = sessions.iter().map(|s| s.app_id()).collect();

    for app_id in tracker.active_apps() {
        if !listed.contains(app_id.as_str()) {
            tracing::debug!(app_id = %app_id, "session removed");
            source.unsubscribe_session(&app_id);
        }
    }

    for session in &sessions {
        source.subscribe_session(session, session_listener(tracker));
    }

    tracker.on_active_sessions_changed(sessions);
}

fn session_listener(tracker: &Arc<SessionTracker>) -> SessionListener {
    let tracker: Weak<SessionTracker> = Arc::downgrade(tracker);
    Arc::new(move |app_id| {
        if let Some(tracker) = tracker.upgrade() {
            tracker.refresh_session(app_id);
        }
    })
}
