//! Monthly usage ledger for quota-limited features.
//!
//! DESIGN
//! ======
//! One [`Storage`] record per user holds a counter per feature, stamped with
//! the UTC calendar month it belongs to. A counter from an earlier month is
//! reset on the next touch, so quotas roll over without a background job.
//! Every sign-in and plan change reloads the page, so counts must live in
//! storage rather than in the ledger itself.
//!
//! TRADE-OFFS
//! ==========
//! The record sits in the user's own `localStorage` and can be cleared by
//! them. Off the browser `BrowserStorage` keeps nothing, so nothing is ever
//! counted; native callers pass a `MemoryStorage`.

#[cfg(test)]
#[path = "usage_test.rs"]
mod usage_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::net::types::PlanTier;
use crate::plan::{Feature, PlanLimits, Quota};
use crate::util::clock;
use crate::util::storage::{BrowserStorage, Storage};

/// Prefix of the per-user `localStorage` record; the user id follows.
pub const USAGE_KEY_PREFIX: &str = "sellernavi-usage:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuotaError {
    #[error("{feature} is not available on the {plan} plan")]
    Unavailable { feature: Feature, plan: PlanTier },
    #[error("{feature} monthly limit reached ({limit} uses)")]
    Exhausted { feature: Feature, limit: u32 },
}

/// `(year, month)` in UTC.
type MonthKey = (i32, u8);

fn month_of(now_ms: i64) -> MonthKey {
    match OffsetDateTime::from_unix_timestamp_nanos(i128::from(now_ms) * 1_000_000) {
        Ok(at) => (at.year(), u8::from(at.month())),
        // Outside the representable range; lump into one bucket.
        Err(_) => (0, 0),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Counter {
    feature: Feature,
    year: i32,
    month: u8,
    used: u32,
}

impl Counter {
    fn used_in(&self, month: MonthKey) -> u32 {
        if (self.year, self.month) == month { self.used } else { 0 }
    }
}

fn usage_key(user_id: &str) -> String {
    format!("{USAGE_KEY_PREFIX}{user_id}")
}

#[derive(Clone, Debug)]
pub struct UsageLedger<S = BrowserStorage> {
    storage: S,
    // Held across each read-modify-write of a record.
    lock: Arc<Mutex<()>>,
}

impl UsageLedger<BrowserStorage> {
    /// Ledger over `window.localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }
}

impl<S: Storage> UsageLedger<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn load(&self, user_id: &str) -> Vec<Counter> {
        let Some(raw) = self.storage.get_item(&usage_key(user_id)) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, %user_id, "dropping unreadable usage record");
            Vec::new()
        })
    }

    fn save(&self, user_id: &str, counters: &[Counter]) {
        match serde_json::to_string(counters) {
            Ok(raw) => self.storage.set_item(&usage_key(user_id), &raw),
            Err(err) => tracing::warn!(error = %err, %user_id, "usage record not serializable"),
        }
    }

    /// Check the plan quota for one use of `feature`, then record it.
    ///
    /// # Errors
    ///
    /// [`QuotaError::Unavailable`] when the plan lacks the feature,
    /// [`QuotaError::Exhausted`] when this month's quota is used up.
    pub fn check_and_record(&self, user_id: &str, feature: Feature, plan: PlanTier) -> Result<Quota, QuotaError> {
        self.check_and_record_at(user_id, feature, plan, clock::now_ms())
    }

    /// Returns the quota left after this use.
    ///
    /// # Errors
    ///
    /// See [`UsageLedger::check_and_record`].
    pub fn check_and_record_at(
        &self,
        user_id: &str,
        feature: Feature,
        plan: PlanTier,
        now_ms: i64,
    ) -> Result<Quota, QuotaError> {
        let limits = PlanLimits::for_plan(plan);
        if !limits.allows(feature) {
            return Err(QuotaError::Unavailable { feature, plan });
        }
        let Some(quota) = limits.quota(feature) else {
            // Available but not metered.
            return Ok(Quota::Unlimited);
        };

        let month = month_of(now_ms);
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut counters = self.load(user_id);
        let used = counters
            .iter()
            .find(|c| c.feature == feature)
            .map_or(0, |c| c.used_in(month));
        if !quota.allows(used) {
            let limit = match quota {
                Quota::Limited(limit) => limit,
                Quota::Unlimited => u32::MAX,
            };
            tracing::info!(%user_id, %feature, limit, "monthly quota exhausted");
            return Err(QuotaError::Exhausted { feature, limit });
        }

        let used = used.saturating_add(1);
        counters.retain(|c| c.feature != feature);
        counters.push(Counter {
            feature,
            year: month.0,
            month: month.1,
            used,
        });
        self.save(user_id, &counters);
        Ok(quota.remaining(used))
    }

    /// Quota left this month without recording a use. `None` when unavailable.
    #[must_use]
    pub fn remaining(&self, user_id: &str, feature: Feature, plan: PlanTier) -> Option<Quota> {
        self.remaining_at(user_id, feature, plan, clock::now_ms())
    }

    #[must_use]
    pub fn remaining_at(&self, user_id: &str, feature: Feature, plan: PlanTier, now_ms: i64) -> Option<Quota> {
        let limits = PlanLimits::for_plan(plan);
        if !limits.allows(feature) {
            return None;
        }
        let Some(quota) = limits.quota(feature) else {
            return Some(Quota::Unlimited);
        };
        let month = month_of(now_ms);
        let used = self
            .load(user_id)
            .iter()
            .find(|c| c.feature == feature)
            .map_or(0, |c| c.used_in(month));
        Some(quota.remaining(used))
    }

    /// Drop every count for `user_id`, as when the account is deleted.
    pub fn forget(&self, user_id: &str) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.storage.remove_item(&usage_key(user_id));
        tracing::debug!(%user_id, "usage record removed");
    }
}
