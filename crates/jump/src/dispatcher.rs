//! Runs jump-back off the interactive path and reports the outcome.

use crate::resolver::{JumpBackResolver, ResumeOutcome};
use poma_events::{emit_json, event_names, EventBusRef, JumpResolvedEvent};
use poma_media::BookmarkRecord;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Dispatches resolver calls onto the blocking pool.
///
/// A dispatched jump is not cancellable; it completes or fails on its own.
#[derive(Clone)]
pub struct JumpDispatcher {
    resolver: Arc<JumpBackResolver>,
    bus: EventBusRef,
}

impl JumpDispatcher {
    pub fn new(resolver: Arc<JumpBackResolver>, bus: EventBusRef) -> Self {
        Self { resolver, bus }
    }

    pub fn resolver(&self) -> &Arc<JumpBackResolver> {
        &self.resolver
    }

    /// Resolve `bookmark` and emit a [`JumpResolvedEvent`].
    pub async fn dispatch(&self, bookmark: BookmarkRecord) -> ResumeOutcome {
        let resolver = Arc::clone(&self.resolver);
        let record = bookmark.clone();

        let outcome = match tokio::task::spawn_blocking(move || resolver.resolve(&record)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "jump-back task failed");
                ResumeOutcome::Failed {
                    reason: format!("jump-back task failed: {}", e),
                }
            }
        };

        emit_json(
            self.bus.as_ref(),
            event_names::JUMP_RESOLVED,
            &resolved_event(&bookmark, &outcome),
        );
        outcome
    }

    /// Fire-and-forget variant; the outcome arrives as an event.
    pub fn spawn(&self, bookmark: BookmarkRecord) -> JoinHandle<ResumeOutcome> {
        let this = self.clone();
        tokio::spawn(async move { this.dispatch(bookmark).await })
    }
}

fn resolved_event(bookmark: &BookmarkRecord, outcome: &ResumeOutcome) -> JumpResolvedEvent {
    JumpResolvedEvent {
        podcast_name: bookmark.podcast_name.clone(),
        episode_name: bookmark.episode_name.clone(),
        outcome: outcome.kind().to_string(),
        target: outcome.target().map(str::to_string),
        position_ms: outcome.position_ms(),
        error: match outcome {
            ResumeOutcome::Failed { reason } => Some(reason.clone()),
            _ => None,
        },
    }
}
