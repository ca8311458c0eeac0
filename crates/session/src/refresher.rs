//! Periodic reconciliation of the active-session list.
//!
//! Platform callbacks are the primary feed; the refresher re-queries the
//! list on a fixed interval in case a callback was missed. It stops as soon
//! as notification access is revoked or its owner cancels it.

use crate::error::SessionError;
use crate::monitor::SessionMonitor;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Default reconciliation interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Background task re-syncing the tracker with the platform.
#[derive(Default)]
pub struct SessionRefresher {
    cancel_token: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl SessionRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start refreshing on the current Tokio runtime.
    pub fn start(&mut self, monitor: Arc<SessionMonitor>) {
        self.start_with_interval(monitor, DEFAULT_REFRESH_INTERVAL);
    }

    pub fn start_with_interval(&mut self, monitor: Arc<SessionMonitor>, interval: Duration) {
        if self.is_running() {
            tracing::warn!("SessionRefresher already running");
            return;
        }

        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        let handle = tokio::spawn(async move {
            tracing::info!(?interval, "SessionRefresher started");

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        match monitor.reconcile() {
                            Ok(()) => {}
                            Err(SessionError::PermissionDenied) => {
                                tracing::info!("notification access revoked, stopping refresh");
                                break;
                            }
                            Err(e) => tracing::warn!(error = %e, "session refresh failed"),
                        }
                    }
                }
            }

            tracing::info!("SessionRefresher stopped");
        });

        self.cancel_token = Some(cancel_token);
        self.handle = Some(handle);
    }

    /// Signal the task to stop without waiting for it.
    pub fn stop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }

    /// Stop and wait for the task to finish.
    pub async fn shutdown(&mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "SessionRefresher task failed to join");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SessionRefresher {
    fn drop(&mut self) {
        self.stop();
    }
}
