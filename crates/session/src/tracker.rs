//! The single "current" media session.
//!
//! The tracker keeps the latest snapshot per app and one current pointer.
//! Writers are serialized by a mutex and publish a fresh immutable
//! [`TrackerState`] through an [`ArcSwap`]; readers load it without locking,
//! so they see either the old state or the new one in full.
//!
//! Selection of the current session:
//! 1. the most recently updated session that is PLAYING
//! 2. otherwise the previous current session, if still tracked
//! 3. otherwise the most recently updated session
//!
//! A platform callback always counts as an update. Re-reads from a new
//! active-session list only count when the content changed; position drift
//! alone keeps the old recency. Every reading takes a ticket before the
//! platform is queried and a reading older than the last one applied for
//! that app is dropped.

use crate::source::SessionHandle;
use arc_swap::ArcSwap;
use poma_events::{
    emit_json, event_names, EventBusRef, NullEventBus, PermissionChangedEvent, SessionChangedEvent,
};
use poma_media::{Extraction, MediaSessionSnapshot};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Latest snapshot for one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSession {
    pub snapshot: MediaSessionSnapshot,
    /// Monotonic update counter; larger means more recent.
    pub updated_seq: u64,
    pub updated_at_ms: i64,
}

impl TrackedSession {
    pub fn app_id(&self) -> &str {
        &self.snapshot.source_app_id
    }
}

/// Immutable view of everything the tracker knows.
#[derive(Clone, Default)]
pub struct TrackerState {
    /// Sessions from the most recent active-session list.
    handles: BTreeMap<String, SessionHandle>,
    /// Latest snapshot per app; always a subset of `handles`.
    sessions: BTreeMap<String, TrackedSession>,
    current: Option<String>,
    next_seq: u64,
    /// Ticket of the newest reading applied per listed app.
    read_marks: BTreeMap<String, u64>,
}

impl TrackerState {
    pub fn current(&self) -> Option<&TrackedSession> {
        self.current.as_ref().and_then(|id| self.sessions.get(id))
    }

    pub fn session(&self, app_id: &str) -> Option<&TrackedSession> {
        self.sessions.get(app_id)
    }

    pub fn sessions(&self) -> impl Iterator<Item = &TrackedSession> {
        self.sessions.values()
    }

    pub fn active_apps(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    fn record(&mut self, snapshot: MediaSessionSnapshot) {
        self.next_seq += 1;
        let tracked = TrackedSession {
            snapshot,
            updated_seq: self.next_seq,
            updated_at_ms: chrono::Utc::now().timestamp_millis(),
        };
        self.sessions.insert(tracked.app_id().to_string(), tracked);
    }

    /// Store a list re-read, keeping the old recency if only the position moved.
    fn refresh(&mut self, snapshot: MediaSessionSnapshot, previous: Option<&TrackedSession>) {
        match previous {
            Some(previous) if same_content(&previous.snapshot, &snapshot) => {
                let tracked = TrackedSession {
                    snapshot,
                    ..previous.clone()
                };
                self.sessions.insert(tracked.app_id().to_string(), tracked);
            }
            _ => self.record(snapshot),
        }
    }

    /// Claim `ticket` for `app_id`; false if a newer reading was applied.
    fn accept_reading(&mut self, app_id: &str, ticket: u64) -> bool {
        let mark = self.read_marks.entry(app_id.to_string()).or_insert(0);
        if ticket < *mark {
            return false;
        }
        *mark = ticket;
        true
    }

    fn reselect(&mut self) {
        let newest_playing = self
            .sessions
            .values()
            .filter(|s| s.snapshot.is_playing())
            .max_by_key(|s| s.updated_seq);

        self.current = if let Some(playing) = newest_playing {
            Some(playing.app_id().to_string())
        } else if let Some(previous) = self
            .current
            .as_ref()
            .filter(|id| self.sessions.contains_key(id.as_str()))
        {
            Some(previous.clone())
        } else {
            self.sessions
                .values()
                .max_by_key(|s| s.updated_seq)
                .map(|s| s.app_id().to_string())
        };
    }
}

fn same_content(old: &MediaSessionSnapshot, new: &MediaSessionSnapshot) -> bool {
    let aligned = MediaSessionSnapshot {
        position_ms: new.position_ms,
        ..old.clone()
    };
    aligned == *new
}

/// Tracks active media sessions and publishes the current one.
pub struct SessionTracker {
    state: ArcSwap<TrackerState>,
    write_lock: Mutex<()>,
    read_seq: AtomicU64,
    current_tx: watch::Sender<Option<MediaSessionSnapshot>>,
    permission_tx: watch::Sender<bool>,
    bus: EventBusRef,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new(Arc::new(NullEventBus))
    }
}

impl SessionTracker {
    pub fn new(bus: EventBusRef) -> Self {
        let (current_tx, _) = watch::channel(None);
        let (permission_tx, _) = watch::channel(false);
        Self {
            state: ArcSwap::from_pointee(TrackerState::default()),
            write_lock: Mutex::new(()),
            read_seq: AtomicU64::new(0),
            current_tx,
            permission_tx,
            bus,
        }
    }

    /// The published current session.
    pub fn current(&self) -> Option<MediaSessionSnapshot> {
        self.current_tx.borrow().clone()
    }

    /// Subscribe to changes of the current session.
    pub fn subscribe(&self) -> watch::Receiver<Option<MediaSessionSnapshot>> {
        self.current_tx.subscribe()
    }

    /// Full immutable state, for diagnostics and the resolver.
    pub fn state(&self) -> Arc<TrackerState> {
        self.state.load_full()
    }

    /// Live handle for an app in the active-session list.
    pub fn session_handle(&self, app_id: &str) -> Option<SessionHandle> {
        self.state.load().handles.get(app_id).cloned()
    }

    /// Apps in the most recent active-session list.
    pub fn active_apps(&self) -> Vec<String> {
        self.state.load().handles.keys().cloned().collect()
    }

    pub fn permission_granted(&self) -> bool {
        *self.permission_tx.borrow()
    }

    pub fn subscribe_permission(&self) -> watch::Receiver<bool> {
        self.permission_tx.subscribe()
    }

    /// Record the notification-access state. Returns `true` if it changed.
    pub fn set_permission(&self, granted: bool) -> bool {
        let changed = self.permission_tx.send_if_modified(|current| {
            if *current == granted {
                false
            } else {
                *current = granted;
                true
            }
        });

        if changed {
            tracing::info!(granted, "notification access changed");
            emit_json(
                self.bus.as_ref(),
                event_names::SESSION_PERMISSION,
                &PermissionChangedEvent {
                    granted,
                    timestamp_ms: chrono::Utc::now().timestamp_millis(),
                },
            );
        }
        changed
    }

    /// Replace the tracked set with a new active-session list.
    ///
    /// Apps missing from `sessions` are dropped; every listed session is
    /// read immediately. A session that is momentarily unreadable keeps its
    /// previous snapshot.
    pub fn on_active_sessions_changed(&self, sessions: Vec<SessionHandle>) {
        // Platform reads happen before taking the write lock.
        let readings: Vec<(SessionHandle, u64, Extraction)> = sessions
            .into_iter()
            .map(|handle| {
                let ticket = self.next_ticket();
                let extraction = handle.extract();
                (handle, ticket, extraction)
            })
            .collect();

        tracing::debug!(count = readings.len(), "active sessions changed");

        self.write(|state| {
            let previous = std::mem::take(&mut state.sessions);
            state.handles.clear();

            for (handle, ticket, extraction) in readings {
                let app_id = handle.app_id().to_string();
                let kept = previous.get(&app_id);

                let extraction = if state.accept_reading(&app_id, ticket) {
                    extraction
                } else {
                    tracing::debug!(app_id = %app_id, "stale list reading ignored");
                    Extraction::Unavailable
                };

                match extraction {
                    Extraction::Snapshot(snapshot) => state.refresh(snapshot, kept),
                    Extraction::Stopped => {}
                    Extraction::Unavailable => {
                        if let Some(kept) = kept {
                            state.sessions.insert(app_id.clone(), kept.clone());
                        }
                    }
                }
                state.handles.insert(app_id, handle);
            }

            let listed = &state.handles;
            state.read_marks.retain(|app_id, _| listed.contains_key(app_id));
        });
    }

    /// Apply a fresh reading for one app.
    ///
    /// Only an explicit STOPPED reading retracts the app's snapshot; an
    /// unreadable session is treated as a transient race and ignored.
    /// Updates for apps outside the active-session list are dropped.
    pub fn on_session_updated(&self, app_id: &str, extraction: Extraction) {
        let ticket = self.next_ticket();
        self.apply_update(app_id, ticket, extraction);
    }

    /// Re-read one app from its stored handle.
    pub fn refresh_session(&self, app_id: &str) {
        let Some(handle) = self.session_handle(app_id) else {
            tracing::debug!(app_id, "refresh for unknown session");
            return;
        };
        let ticket = self.next_ticket();
        let extraction = handle.extract();
        self.apply_update(app_id, ticket, extraction);
    }

    fn next_ticket(&self) -> u64 {
        self.read_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply_update(&self, app_id: &str, ticket: u64, extraction: Extraction) {
        self.write(|state| {
            if !state.handles.contains_key(app_id) {
                tracing::debug!(app_id, "update for inactive session ignored");
                return;
            }
            if !state.accept_reading(app_id, ticket) {
                tracing::debug!(app_id, ticket, "stale session reading ignored");
                return;
            }

            match extraction {
                Extraction::Snapshot(snapshot) => state.record(snapshot),
                Extraction::Stopped => {
                    tracing::debug!(app_id, "session stopped, retracting");
                    state.sessions.remove(app_id);
                }
                Extraction::Unavailable => {
                    tracing::debug!(app_id, "session unreadable, keeping last snapshot");
                }
            }
        });
    }

    /// Forget every session, e.g. after notification access was revoked.
    pub fn clear(&self) {
        self.write(|state| {
            state.handles.clear();
            state.sessions.clear();
            state.read_marks.clear();
        });
    }

    fn write<F>(&self, mutate: F)
    where
        F: FnOnce(&mut TrackerState),
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut next = TrackerState::clone(&self.state.load());
        mutate(&mut next);
        next.reselect();

        let current = next.current().map(|s| s.snapshot.clone());
        let is_podcast = current.as_ref().is_some_and(|s| s.is_podcast_content());
        let tracked_apps: Vec<String> = next.sessions.keys().cloned().collect();

        self.state.store(Arc::new(next));

        // Publish while still holding the write lock so observers see
        // changes in the order they were applied.
        let changed = self.current_tx.send_if_modified(|published| {
            if *published == current {
                false
            } else {
                *published = current.clone();
                true
            }
        });

        if changed {
            tracing::debug!(
                app_id = current.as_ref().map(|s| s.source_app_id.as_str()),
                "current session changed"
            );
            emit_json(
                self.bus.as_ref(),
                event_names::SESSION_CHANGED,
                &SessionChangedEvent {
                    current,
                    is_podcast,
                    tracked_apps,
                    timestamp_ms: chrono::Utc::now().timestamp_millis(),
                },
            );
        }
    }
}
