//! Media session tracking for POMA.
//!
//! This crate keeps track of which media app is currently relevant:
//! - Which sessions are active (pushed by the platform)
//! - What each one is playing (re-read on every callback)
//! - Which one to surface (newest PLAYING session wins)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Platform seam                            │
//! │  source.rs  - SessionSource / MediaSession traits            │
//! │  fake.rs    - in-memory implementation                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  tracker.rs - copy-on-write state, current-session pointer   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  monitor.rs   - callback wiring, permission checks           │
//! │  refresher.rs - periodic reconciliation task                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use poma_session::{SessionMonitor, SessionRefresher, SessionTracker};
//! use std::sync::Arc;
//!
//! let tracker = Arc::new(SessionTracker::new(bus));
//! let monitor = Arc::new(SessionMonitor::new(tracker.clone(), platform_source));
//! monitor.start()?;
//!
//! let mut refresher = SessionRefresher::new();
//! refresher.start(monitor.clone());
//!
//! let mut current = tracker.subscribe();
//! while current.changed().await.is_ok() {
//!     println!("{:?}", *current.borrow());
//! }
//! ```

mod error;
mod monitor;
mod refresher;
mod source;
mod tracker;

pub mod fake;

pub use error::{ControlError, Result, SessionError};
pub use monitor::SessionMonitor;
pub use refresher::{SessionRefresher, DEFAULT_REFRESH_INTERVAL};
pub use source::{
    ActiveSessionsListener, MediaSession, NullSource, SessionHandle, SessionListener,
    SessionSource,
};
pub use tracker::{SessionTracker, TrackedSession, TrackerState};
