//! Jump-back for POMA bookmarks.
//!
//! Given a stored bookmark and the tracker's current session, resume
//! playback as close to the bookmarked moment as possible:
//!
//! ```text
//! BookmarkRecord ──► JumpBackResolver ──► seek live session?
//!                                    └──► deep link?        (UriLauncher)
//!                                    └──► web URL           (UriLauncher)
//! ```
//!
//! All strategies resume 10 seconds before the saved timestamp.
//! [`JumpDispatcher`] runs the resolver on the blocking pool and publishes
//! the outcome on the event bus.

mod dispatcher;
mod launcher;
mod links;
mod resolver;

pub use dispatcher::JumpDispatcher;
pub use launcher::{InMemoryLauncher, LaunchError, LaunchRequest, NullLauncher, UriLauncher};
pub use links::{
    deep_link, rewound, search_query, web_url, DEFAULT_REWIND_MS, SPOTIFY_URI_PREFIX,
};
pub use resolver::{JumpBackResolver, ResumeOutcome};
