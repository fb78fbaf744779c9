//! Dashboard search status.
//!
//! DESIGN
//! ======
//! The dashboard opens on cached results (`Cache`). A search or refresh moves
//! to `Fetching` and completion to `Complete`, stamping `last_updated`. Only
//! one search runs at a time, and a kind the plan gate disables never starts.
//!
//! Started searches are remembered in a [`SearchHistory`] for this tab. What
//! the dashboard shows from it is bounded by the plan's history retention.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use std::time::Duration;

use crate::config::SearchConfig;
use crate::net::types::{DAY_MS, PlanTier};
use crate::plan::{self, Feature, HistoryRetention, PlanLimits};

const HOUR_MS: i64 = 60 * 60 * 1000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Cache,
    Fetching,
    Complete,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchKind {
    #[default]
    Normal,
    Realtime,
}

impl SearchKind {
    /// Plan feature consumed by one search of this kind.
    #[must_use]
    pub fn feature(self) -> Feature {
        match self {
            Self::Normal => Feature::RankingSearch,
            Self::Realtime => Feature::RealtimeSearch,
        }
    }

    #[must_use]
    pub fn latency(self, config: &SearchConfig) -> Duration {
        match self {
            Self::Normal => config.normal_latency,
            Self::Realtime => config.realtime_latency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchRejected {
    #[error("a search is already running")]
    InFlight,
    #[error("{0} is not included in the current plan")]
    NotInPlan(Feature),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    pub status: SearchStatus,
    pub kind: SearchKind,
    /// A user-started search is running.
    pub searching: bool,
    pub last_updated: i64,
}

impl SearchState {
    #[must_use]
    pub fn new(now_ms: i64) -> Self {
        Self {
            status: SearchStatus::Cache,
            kind: SearchKind::Normal,
            searching: false,
            last_updated: now_ms,
        }
    }

    /// Start a search of `kind` for a user on `plan`.
    ///
    /// # Errors
    ///
    /// [`SearchRejected::InFlight`] while another search runs,
    /// [`SearchRejected::NotInPlan`] when the plan gate disables `kind`.
    pub fn begin(&mut self, kind: SearchKind, plan: PlanTier) -> Result<(), SearchRejected> {
        self.can_begin(kind, plan)?;
        self.searching = true;
        self.kind = kind;
        self.status = SearchStatus::Fetching;
        Ok(())
    }

    /// Whether [`SearchState::begin`] would accept `kind` right now.
    ///
    /// # Errors
    ///
    /// Same as [`SearchState::begin`].
    pub fn can_begin(&self, kind: SearchKind, plan: PlanTier) -> Result<(), SearchRejected> {
        if self.searching {
            return Err(SearchRejected::InFlight);
        }
        if !plan::gate(plan, kind.feature()).enabled {
            return Err(SearchRejected::NotInPlan(kind.feature()));
        }
        Ok(())
    }

    /// Re-fetch the current results. Ignored while a search runs.
    pub fn begin_refresh(&mut self) -> bool {
        if self.searching {
            return false;
        }
        self.status = SearchStatus::Fetching;
        true
    }

    pub fn complete(&mut self, now_ms: i64) {
        self.status = SearchStatus::Complete;
        self.searching = false;
        self.last_updated = now_ms;
    }

    /// Whole days since the data was last fetched.
    #[must_use]
    pub fn days_since_update(&self, now_ms: i64) -> i64 {
        (now_ms - self.last_updated).max(0) / DAY_MS
    }

    #[must_use]
    pub fn status_label(&self, now_ms: i64) -> String {
        let days = self.days_since_update(now_ms);
        match self.status {
            SearchStatus::Cache => format!("キャッシュから表示中 ({days}日前に更新)"),
            SearchStatus::Fetching => match self.kind {
                SearchKind::Realtime => "リアルタイム検索中... (最大30秒)".to_owned(),
                SearchKind::Normal => "新しいデータを取得中... (最大10秒)".to_owned(),
            },
            SearchStatus::Complete if days == 0 => "更新完了: 本日に取得したデータを表示".to_owned(),
            SearchStatus::Complete => format!("更新完了: {days}日前に取得したデータを表示"),
        }
    }
}

/// Age of a single product row, in hours under a day and days beyond.
#[must_use]
pub fn freshness_label(updated_at: i64, now_ms: i64) -> String {
    let hours = (now_ms - updated_at).max(0) / HOUR_MS;
    if hours < 1 {
        "1時間以内に更新".to_owned()
    } else if hours < 24 {
        format!("{hours}時間前に更新")
    } else {
        format!("{}日前に更新", hours / 24)
    }
}

/// One started search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query: String,
    pub kind: SearchKind,
    pub period_days: u32,
    pub at: i64,
}

/// Searches started in this tab, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    /// Remember `entry` when `plan` keeps history at all.
    pub fn record(&mut self, plan: PlanTier, entry: HistoryEntry) {
        if PlanLimits::for_plan(plan).history.is_available() {
            self.entries.insert(0, entry);
        }
    }

    /// Entries still inside the `retention` window at `now_ms`.
    #[must_use]
    pub fn visible(&self, retention: HistoryRetention, now_ms: i64) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .filter(|e| retention.keeps(e.at, now_ms))
            .cloned()
            .collect()
    }
}
