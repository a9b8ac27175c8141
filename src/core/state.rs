// File: src/core/state.rs
use crate::core::types::ItemIndex;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Which collapsed part of a practice exercise is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reveal {
    Hint,
    Solution,
}

/// Session-only UI state. Nothing here survives a restart.
///
/// Selection and search are independent: changing the search never clears
/// the selection, even when the selected topic no longer matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selected_topic_id: Option<String>,
    pub selected_section_id: Option<String>,
    pub search_query: String,
    pub dark_mode: bool,
    /// Opened hints and solutions of the expanded section.
    pub revealed: BTreeSet<(ItemIndex, Reveal)>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always starts the topic with no section expanded.
    pub fn select_topic(self, topic_id: &str) -> Self {
        Self {
            selected_topic_id: Some(topic_id.to_string()),
            selected_section_id: None,
            revealed: BTreeSet::new(),
            ..self
        }
    }

    /// Sets, never toggles: re-selecting the open section keeps it open.
    pub fn select_section(self, section_id: &str) -> Self {
        if self.selected_section_id.as_deref() == Some(section_id) {
            return self;
        }
        Self {
            selected_section_id: Some(section_id.to_string()),
            revealed: BTreeSet::new(),
            ..self
        }
    }

    pub fn set_search(self, query: &str) -> Self {
        Self {
            search_query: query.to_string(),
            ..self
        }
    }

    pub fn toggle_theme(self) -> Self {
        Self {
            dark_mode: !self.dark_mode,
            ..self
        }
    }

    pub fn reveal(mut self, index: ItemIndex, part: Reveal) -> Self {
        self.revealed.insert((index, part));
        self
    }

    pub fn is_revealed(&self, index: ItemIndex, part: Reveal) -> bool {
        self.revealed.contains(&(index, part))
    }

    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}
