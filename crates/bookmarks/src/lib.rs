//! Bookmark backend access for POMA.
//!
//! - `model`  - wire types and their mapping to [`poma_media::BookmarkRecord`]
//! - `view`   - list filtering and ordering
//! - `client` - authenticated REST client
//! - `config` - local/cloud backend selection

mod client;
mod config;
mod error;
mod model;
mod view;

pub use client::BookmarksClient;
pub use config::{ApiConfig, Backend, DEFAULT_CLOUD_URL, DEFAULT_LOCAL_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{BookmarksError, Result};
pub use model::{Bookmark, CreateBookmarkRequest, UpdateBookmarkRequest};
pub use view::{BookmarkView, SortOrder};
