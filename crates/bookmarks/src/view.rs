//! Filtering and ordering of the bookmark list.

use crate::model::Bookmark;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first; chronological within one episode when filtered.
    #[default]
    TimeDesc,
    EpisodeName,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::TimeDesc => SortOrder::EpisodeName,
            SortOrder::EpisodeName => SortOrder::TimeDesc,
        }
    }
}

/// List presentation state: one optional episode filter plus a sort order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkView {
    pub sort: SortOrder,
    pub episode_filter: Option<String>,
}

impl BookmarkView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_episode(&mut self, episode_name: impl Into<String>) {
        self.episode_filter = Some(episode_name.into());
    }

    pub fn clear_filter(&mut self) {
        self.episode_filter = None;
    }

    pub fn is_filtered(&self) -> bool {
        self.episode_filter.is_some()
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggled();
    }

    pub fn title(&self) -> &'static str {
        if self.is_filtered() {
            "FILTERED EPISODE"
        } else {
            "MY BOOKMARKS"
        }
    }

    /// Label for the sort toggle.
    pub fn sort_label(&self) -> &'static str {
        match (self.sort, self.is_filtered()) {
            (SortOrder::TimeDesc, true) => "Timeline",
            (SortOrder::TimeDesc, false) => "Time ↓",
            (SortOrder::EpisodeName, _) => "A-Z",
        }
    }

    /// The bookmarks to display, in display order.
    pub fn apply<'a>(&self, bookmarks: &'a [Bookmark]) -> Vec<&'a Bookmark> {
        let mut shown: Vec<&Bookmark> = match &self.episode_filter {
            Some(episode) => bookmarks
                .iter()
                .filter(|b| &b.episode_name == episode)
                .collect(),
            None => bookmarks.iter().collect(),
        };

        match self.sort {
            SortOrder::TimeDesc if self.is_filtered() => {
                shown.sort_by_key(|b| b.timestamp_ms);
            }
            SortOrder::TimeDesc => {
                shown.sort_by_key(|b| Reverse((b.created_at_time(), b.created_at.clone())));
            }
            SortOrder::EpisodeName => {
                shown.sort_by(|a, b| a.episode_name.cmp(&b.episode_name));
            }
        }
        shown
    }
}
