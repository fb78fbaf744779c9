//! User, plan and session records.
//!
//! DESIGN
//! ======
//! Field names serialize in camelCase and timestamps are milliseconds since
//! the Unix epoch, matching the session record the web product already keeps
//! in `localStorage`. Changing a name here orphans every stored session.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Subscription level determining feature quotas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Standard,
    Pro,
}

impl PlanTier {
    /// Every tier, cheapest first.
    pub const ALL: [PlanTier; 3] = [PlanTier::Free, PlanTier::Standard, PlanTier::Pro];

    /// Stable lowercase identifier (`"free"`, `"standard"`, `"pro"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Standard => "standard",
            Self::Pro => "pro",
        }
    }

    /// Name shown to customers.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Free => "フリー",
            Self::Standard => "スタンダード",
            Self::Pro => "プロ",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan tier: {0}")]
pub struct UnknownPlanTier(pub String);

impl FromStr for PlanTier {
    type Err = UnknownPlanTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "standard" => Ok(Self::Standard),
            "pro" => Ok(Self::Pro),
            other => Err(UnknownPlanTier(other.to_owned())),
        }
    }
}

/// An account holder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email, compared verbatim.
    pub email: String,
    /// Contact phone as entered at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Current subscription tier.
    pub plan: PlanTier,
    /// End of the trial period, if the account is on one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_ends_at: Option<i64>,
    /// Account creation time.
    pub created_at: i64,
}

impl User {
    /// Whether the trial is still running at `now_ms`.
    #[must_use]
    pub fn on_trial_at(&self, now_ms: i64) -> bool {
        self.trial_ends_at.is_some_and(|ends| now_ms < ends)
    }
}

/// Authenticated user, opaque token and absolute expiry, persisted as one record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    pub expires_at: i64,
}

impl AuthSession {
    /// A session is valid strictly before its expiry.
    #[must_use]
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at
    }
}
