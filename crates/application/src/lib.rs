//! POMA composition root.
//!
//! ```text
//!  platform sessions ─► SessionTracker ─► current() ─► UI
//!                            │
//!  bookmark swipe ─► gesture ─► handle_intent ─► JumpBackResolver ─► seek / deep link / web
//! ```
//!
//! [`Poma`] owns the session monitor, the refresh task and the jump
//! dispatcher; [`PomaConfig`] and [`init_logging`] cover the ambient setup.

mod app;
mod config;
mod constants;
mod logging;

pub use app::{IntentAction, Poma};
pub use config::{ConfigError, PomaConfig};
pub use constants::*;
pub use logging::init_logging;
