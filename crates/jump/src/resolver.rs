//! Jump-back: resume a bookmarked episode at its saved position.
//!
//! Three strategies are tried in order and the first success wins:
//! 1. seek the live Spotify session if it already has the episode loaded
//! 2. open an app deep link
//! 3. open a web URL (episode page or search)
//!
//! Every strategy swallows its own failure; the resolver never errors.

use crate::launcher::{LaunchRequest, UriLauncher};
use crate::links::{deep_link, rewound, web_url, DEFAULT_REWIND_MS};
use poma_media::{is_spotify_app, BookmarkRecord};
use poma_session::SessionTracker;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How a jump-back attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResumeOutcome {
    /// The live session was seeked and resumed.
    Seeked { app_id: String, position_ms: u64 },
    /// An app deep link was opened.
    DeepLinked { uri: String, position_ms: u64 },
    /// A browser was handed a web URL.
    WebFallback { url: String },
    /// Nothing could be opened, not even the browser.
    Failed { reason: String },
}

impl ResumeOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            ResumeOutcome::Seeked { .. } => "seeked",
            ResumeOutcome::DeepLinked { .. } => "deep_linked",
            ResumeOutcome::WebFallback { .. } => "web_fallback",
            ResumeOutcome::Failed { .. } => "failed",
        }
    }

    /// App id, URI or URL the jump landed on.
    pub fn target(&self) -> Option<&str> {
        match self {
            ResumeOutcome::Seeked { app_id, .. } => Some(app_id),
            ResumeOutcome::DeepLinked { uri, .. } => Some(uri),
            ResumeOutcome::WebFallback { url } => Some(url),
            ResumeOutcome::Failed { .. } => None,
        }
    }

    pub fn position_ms(&self) -> Option<u64> {
        match self {
            ResumeOutcome::Seeked { position_ms, .. }
            | ResumeOutcome::DeepLinked { position_ms, .. } => Some(*position_ms),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, ResumeOutcome::Failed { .. })
    }
}

/// Decides how to resume a bookmark given the current session landscape.
pub struct JumpBackResolver {
    tracker: Arc<SessionTracker>,
    launcher: Arc<dyn UriLauncher>,
    rewind_ms: u64,
}

impl JumpBackResolver {
    pub fn new(tracker: Arc<SessionTracker>, launcher: Arc<dyn UriLauncher>) -> Self {
        Self {
            tracker,
            launcher,
            rewind_ms: DEFAULT_REWIND_MS,
        }
    }

    pub fn with_rewind_ms(mut self, rewind_ms: u64) -> Self {
        self.rewind_ms = rewind_ms;
        self
    }

    pub fn rewind_ms(&self) -> u64 {
        self.rewind_ms
    }

    /// Resume `bookmark`. May block on IPC to other apps.
    pub fn resolve(&self, bookmark: &BookmarkRecord) -> ResumeOutcome {
        let position_ms = rewound(bookmark.timestamp_ms, self.rewind_ms);

        if let Some(outcome) = self.try_seek(bookmark, position_ms) {
            return outcome;
        }
        if let Some(outcome) = self.try_deep_link(bookmark, position_ms) {
            return outcome;
        }
        self.web_fallback(bookmark, position_ms)
    }

    fn try_seek(&self, bookmark: &BookmarkRecord, position_ms: u64) -> Option<ResumeOutcome> {
        let package = bookmark.source_app_package.as_deref()?;
        let media_id = bookmark.media_id.as_deref()?;
        if !is_spotify_app(package) {
            return None;
        }

        let current = self.tracker.current()?;
        if current.source_app_id != package || current.media_id.as_deref() != Some(media_id) {
            tracing::debug!(
                app_id = %current.source_app_id,
                "current session does not hold the bookmarked episode"
            );
            return None;
        }

        let session = self.tracker.session_handle(package)?;
        let result = session.seek_to(position_ms).and_then(|()| session.play());
        match result {
            Ok(()) => {
                tracing::info!(app_id = %package, position_ms, "resumed in place");
                Some(ResumeOutcome::Seeked {
                    app_id: package.to_string(),
                    position_ms,
                })
            }
            Err(e) => {
                tracing::warn!(app_id = %package, error = %e, "in-place seek failed, falling back");
                None
            }
        }
    }

    fn try_deep_link(&self, bookmark: &BookmarkRecord, position_ms: u64) -> Option<ResumeOutcome> {
        let request = deep_link(bookmark, position_ms)?;
        match self.launcher.launch(&request) {
            Ok(()) => {
                tracing::info!(uri = %request.uri, "opened deep link");
                Some(ResumeOutcome::DeepLinked {
                    uri: request.uri,
                    position_ms,
                })
            }
            Err(e) => {
                tracing::warn!(uri = %request.uri, error = %e, "deep link failed, falling back");
                None
            }
        }
    }

    fn web_fallback(&self, bookmark: &BookmarkRecord, position_ms: u64) -> ResumeOutcome {
        let url = web_url(bookmark, position_ms);
        match self.launcher.launch(&LaunchRequest::new(url.clone())) {
            Ok(()) => {
                tracing::info!(url = %url, "opened web fallback");
                ResumeOutcome::WebFallback { url }
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "every resume strategy failed");
                ResumeOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
