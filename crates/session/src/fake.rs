//! In-memory session source for tests and headless runs.
//!
//! Mirrors how the platform behaves: listeners are replaced on
//! re-registration and invoked synchronously, outside internal locks.

use crate::error::{ControlError, SessionError};
use crate::source::{
    ActiveSessionsListener, MediaSession, SessionHandle, SessionListener, SessionSource,
};
use poma_media::{MetadataReader, PlaybackReader, RawMetadata, RawPlayback};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Transport command received by an [`InMemorySession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    SeekTo(u64),
    Play,
}

/// A controllable media session that records transport commands.
pub struct InMemorySession {
    app_id: String,
    metadata: Mutex<Option<RawMetadata>>,
    playback: Mutex<Option<RawPlayback>>,
    commands: Mutex<Vec<TransportCommand>>,
    reject_commands: AtomicBool,
}

impl InMemorySession {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            metadata: Mutex::new(None),
            playback: Mutex::new(None),
            commands: Mutex::new(Vec::new()),
            reject_commands: AtomicBool::new(false),
        }
    }

    pub fn set_metadata(&self, metadata: Option<RawMetadata>) {
        *lock(&self.metadata) = metadata;
    }

    pub fn set_playback(&self, playback: Option<RawPlayback>) {
        *lock(&self.playback) = playback;
    }

    /// Make subsequent seek/play calls fail.
    pub fn reject_commands(&self, reject: bool) {
        self.reject_commands.store(reject, Ordering::SeqCst);
    }

    pub fn commands(&self) -> Vec<TransportCommand> {
        lock(&self.commands).clone()
    }

    fn command(&self, command: TransportCommand) -> Result<(), ControlError> {
        if self.reject_commands.load(Ordering::SeqCst) {
            return Err(ControlError::Rejected(format!("{command:?}")));
        }
        lock(&self.commands).push(command);
        Ok(())
    }
}

impl MediaSession for InMemorySession {
    fn app_id(&self) -> &str {
        &self.app_id
    }

    fn metadata(&self) -> Option<Arc<dyn MetadataReader>> {
        lock(&self.metadata)
            .clone()
            .map(|m| Arc::new(m) as Arc<dyn MetadataReader>)
    }

    fn playback(&self) -> Option<Arc<dyn PlaybackReader>> {
        lock(&self.playback).map(|p| Arc::new(p) as Arc<dyn PlaybackReader>)
    }

    fn seek_to(&self, position_ms: u64) -> Result<(), ControlError> {
        self.command(TransportCommand::SeekTo(position_ms))
    }

    fn play(&self) -> Result<(), ControlError> {
        self.command(TransportCommand::Play)
    }
}

/// Session source backed by an in-memory list.
#[derive(Default)]
pub struct InMemorySessionSource {
    access: AtomicBool,
    sessions: Mutex<Vec<SessionHandle>>,
    active_listener: Mutex<Option<ActiveSessionsListener>>,
    session_listeners: Mutex<HashMap<String, SessionListener>>,
}

impl InMemorySessionSource {
    /// Source with notification access granted.
    pub fn granted() -> Self {
        let source = Self::default();
        source.set_access(true);
        source
    }

    pub fn set_access(&self, granted: bool) {
        self.access.store(granted, Ordering::SeqCst);
    }

    /// Replace the active list without notifying (a missed callback).
    pub fn replace_sessions(&self, sessions: Vec<SessionHandle>) {
        *lock(&self.sessions) = sessions;
    }

    /// Replace the active list and notify the registered listener.
    pub fn set_active(&self, sessions: Vec<SessionHandle>) {
        self.replace_sessions(sessions.clone());
        let listener = lock(&self.active_listener).clone();
        if let Some(listener) = listener {
            listener(sessions);
        }
    }

    /// Fire the metadata/playback callback for an app.
    pub fn notify(&self, app_id: &str) {
        let listener = lock(&self.session_listeners).get(app_id).cloned();
        if let Some(listener) = listener {
            listener(app_id);
        }
    }

    pub fn is_subscribed(&self, app_id: &str) -> bool {
        lock(&self.session_listeners).contains_key(app_id)
    }

    pub fn has_active_listener(&self) -> bool {
        lock(&self.active_listener).is_some()
    }
}

impl SessionSource for InMemorySessionSource {
    fn has_notification_access(&self) -> bool {
        self.access.load(Ordering::SeqCst)
    }

    fn active_sessions(&self) -> Result<Vec<SessionHandle>, SessionError> {
        if !self.has_notification_access() {
            return Err(SessionError::PermissionDenied);
        }
        Ok(lock(&self.sessions).clone())
    }

    fn subscribe_active_sessions(
        &self,
        listener: ActiveSessionsListener,
    ) -> Result<(), SessionError> {
        if !self.has_notification_access() {
            return Err(SessionError::PermissionDenied);
        }
        *lock(&self.active_listener) = Some(listener);
        Ok(())
    }

    fn subscribe_session(&self, session: &SessionHandle, listener: SessionListener) {
        lock(&self.session_listeners).insert(session.app_id().to_string(), listener);
    }

    fn unsubscribe_session(&self, app_id: &str) {
        lock(&self.session_listeners).remove(app_id);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
