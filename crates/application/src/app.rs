//! The UI-facing facade.

use crate::config::PomaConfig;
use poma_bookmarks::Bookmark;
use poma_events::{emit_json, event_names, BookmarkIntentEvent, EventBusRef};
use poma_gesture::{classify_offset, BookmarkGestureController, GestureIntent};
use poma_jump::{JumpBackResolver, JumpDispatcher, ResumeOutcome, UriLauncher};
use poma_media::{BookmarkDraft, BookmarkRecord, MediaSessionSnapshot};
use poma_session::{SessionError, SessionMonitor, SessionRefresher, SessionSource, SessionTracker};
use std::sync::Arc;
use tokio::sync::watch;

/// What the UI should do after a swipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentAction {
    /// Ask the user to confirm deleting the bookmark.
    ConfirmDelete { bookmark_id: i64 },
    /// Open the transcript editor.
    Edit { bookmark_id: i64 },
    /// Narrow the list to one episode.
    FilterByEpisode { episode_name: String },
    Jumped(ResumeOutcome),
    /// Nothing to do (no intent, or nowhere to jump).
    Ignored,
}

/// Wires session monitoring, jump-back and gesture handling together.
pub struct Poma {
    config: PomaConfig,
    bus: EventBusRef,
    tracker: Arc<SessionTracker>,
    monitor: Arc<SessionMonitor>,
    dispatcher: JumpDispatcher,
    refresher: SessionRefresher,
}

impl Poma {
    pub fn new(
        config: PomaConfig,
        source: Arc<dyn SessionSource>,
        launcher: Arc<dyn UriLauncher>,
        bus: EventBusRef,
    ) -> Self {
        let tracker = Arc::new(SessionTracker::new(bus.clone()));
        let monitor = Arc::new(SessionMonitor::new(tracker.clone(), source));
        let resolver =
            JumpBackResolver::new(tracker.clone(), launcher).with_rewind_ms(config.rewind_ms);
        let dispatcher = JumpDispatcher::new(Arc::new(resolver), bus.clone());

        Self {
            config,
            bus,
            tracker,
            monitor,
            dispatcher,
            refresher: SessionRefresher::new(),
        }
    }

    pub fn config(&self) -> &PomaConfig {
        &self.config
    }

    pub fn tracker(&self) -> &Arc<SessionTracker> {
        &self.tracker
    }

    /// Attach to the platform and start periodic reconciliation.
    ///
    /// Must be called from within a Tokio runtime. Without notification
    /// access nothing is started and the permission event tells the UI.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.monitor.start()?;
        self.refresher
            .start_with_interval(self.monitor.clone(), self.config.refresh_interval());
        tracing::info!(backend = %self.config.api.describe(), "POMA started");
        Ok(())
    }

    /// Re-check permission and the session list, e.g. when the app resumes.
    pub fn reconcile(&mut self) -> Result<(), SessionError> {
        self.monitor.reconcile()?;
        if !self.refresher.is_running() {
            self.refresher
                .start_with_interval(self.monitor.clone(), self.config.refresh_interval());
        }
        Ok(())
    }

    pub async fn shutdown(&mut self) {
        self.refresher.shutdown().await;
        tracing::info!("POMA stopped");
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresher.is_running()
    }

    pub fn current(&self) -> Option<MediaSessionSnapshot> {
        self.tracker.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<MediaSessionSnapshot>> {
        self.tracker.subscribe()
    }

    pub fn permission_granted(&self) -> bool {
        self.tracker.permission_granted()
    }

    /// Bookmark for the current moment; only while something is playing.
    pub fn bookmark_from_current(&self) -> Option<BookmarkDraft> {
        self.current()
            .filter(MediaSessionSnapshot::is_playing)
            .map(|snapshot| snapshot.to_bookmark_draft())
    }

    pub async fn resolve_jump(&self, bookmark: BookmarkRecord) -> ResumeOutcome {
        self.dispatcher.dispatch(bookmark).await
    }

    pub fn classify_gesture(&self, offset: f32, max_distance: f32) -> GestureIntent {
        classify_offset(offset, max_distance, self.config.gesture)
    }

    /// A fresh controller for one bookmark card.
    pub fn gesture_controller(&self, max_distance: f32) -> BookmarkGestureController {
        BookmarkGestureController::with_thresholds(max_distance, self.config.gesture)
    }

    /// Act on a swipe intent for `bookmark`.
    pub async fn handle_intent(&self, bookmark: &Bookmark, intent: GestureIntent) -> IntentAction {
        if intent.is_none() {
            return IntentAction::Ignored;
        }

        emit_json(
            self.bus.as_ref(),
            event_names::BOOKMARK_INTENT,
            &BookmarkIntentEvent {
                bookmark_id: Some(bookmark.id),
                episode_name: bookmark.episode_name.clone(),
                intent: intent.label().to_string(),
            },
        );

        match intent {
            GestureIntent::Delete => IntentAction::ConfirmDelete {
                bookmark_id: bookmark.id,
            },
            GestureIntent::Edit => IntentAction::Edit {
                bookmark_id: bookmark.id,
            },
            GestureIntent::FilterByEpisode => IntentAction::FilterByEpisode {
                episode_name: bookmark.episode_name.clone(),
            },
            GestureIntent::JumpToSource if bookmark.can_jump_to_source() => {
                IntentAction::Jumped(self.resolve_jump(bookmark.record()).await)
            }
            GestureIntent::JumpToSource => {
                tracing::debug!(
                    id = bookmark.id,
                    package = ?bookmark.source_app_package,
                    "no Spotify source to jump to"
                );
                IntentAction::Ignored
            }
            GestureIntent::None => IntentAction::Ignored,
        }
    }
}
