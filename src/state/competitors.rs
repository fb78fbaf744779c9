//! Competitor list paging, card expansion and the open analysis panel.

#[cfg(test)]
#[path = "competitors_test.rs"]
mod competitors_test;

use std::collections::HashSet;

/// Rows added per "show more".
pub const PAGE_SIZE: usize = 10;
/// Upper bound on rows the list will ever show.
pub const MAX_VISIBLE: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompetitorListState {
    pub visible: usize,
    pub loading: bool,
    /// Competitor whose analysis panel is open.
    pub selected: Option<String>,
    expanded: HashSet<String>,
}

impl Default for CompetitorListState {
    fn default() -> Self {
        Self {
            visible: PAGE_SIZE,
            loading: false,
            selected: None,
            expanded: HashSet::new(),
        }
    }
}

impl CompetitorListState {
    /// Rows the next "show more" would add.
    #[must_use]
    pub fn next_batch(&self) -> usize {
        (self.visible + PAGE_SIZE).min(MAX_VISIBLE) - self.visible
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible < MAX_VISIBLE
    }

    /// Start loading the next page. Refused while loading or when full.
    pub fn begin_load_more(&mut self) -> bool {
        if self.loading || !self.has_more() {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn finish_load_more(&mut self) {
        self.visible = (self.visible + PAGE_SIZE).min(MAX_VISIBLE);
        self.loading = false;
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_owned());
        }
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn close_analysis(&mut self) {
        self.selected = None;
    }
}
