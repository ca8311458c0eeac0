//! Swipe gestures on bookmark cards.
//!
//! Pure domain logic - no I/O. A horizontal drag is accumulated into a
//! clamped offset and, when the finger lifts, classified into one intent:
//!
//! ```text
//!  -max        -50%      -20%        0        +20%       +50%        +max
//!   |  Filter   |  Jump    |      None       |   Edit    |  Delete    |
//! ```
//!
//! The controller only emits intents; acting on them is up to the caller.

mod controller;
mod intent;

pub use controller::{BookmarkGestureController, GesturePhase, SwipeGestureState};
pub use intent::{classify_offset, GestureIntent, GestureThresholds};
