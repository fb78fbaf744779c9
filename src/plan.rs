//! Plan tiers, their capability limits and the UI action gate.
//!
//! DESIGN
//! ======
//! Limits are a pure function of the tier. Pages never compare tiers
//! directly; they ask `gate` for an `ActionGate` so an ineligible action is
//! rendered disabled with its own label instead of failing on click.
//! Per-user consumption of the monthly quotas lives in `services::usage`.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::net::types::{DAY_MS, PlanTier};

/// Monthly allowance for a counted feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quota {
    Limited(u32),
    Unlimited,
}

impl Quota {
    /// Whether one more use is allowed after `used` uses this month.
    #[must_use]
    pub fn allows(self, used: u32) -> bool {
        match self {
            Self::Limited(limit) => used < limit,
            Self::Unlimited => true,
        }
    }

    /// Uses left this month after `used`.
    #[must_use]
    pub fn remaining(self, used: u32) -> Quota {
        match self {
            Self::Limited(limit) => Self::Limited(limit.saturating_sub(used)),
            Self::Unlimited => Self::Unlimited,
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Limited(n) => format!("月{n}回"),
            Self::Unlimited => "無制限".to_owned(),
        }
    }
}

/// How long search history is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryRetention {
    None,
    Days(u32),
    Unlimited,
}

impl HistoryRetention {
    #[must_use]
    pub fn is_available(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether an entry recorded at `recorded_at` is still kept at `now_ms`.
    #[must_use]
    pub fn keeps(self, recorded_at: i64, now_ms: i64) -> bool {
        match self {
            Self::None => false,
            Self::Days(days) => now_ms.saturating_sub(recorded_at) < i64::from(days) * DAY_MS,
            Self::Unlimited => true,
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::None => "保存なし".to_owned(),
            Self::Days(days) => format!("{days}日間保存"),
            Self::Unlimited => "無制限保存".to_owned(),
        }
    }
}

/// Plan-gated product features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    RankingSearch,
    CompetitorSearch,
    RealtimeSearch,
    SearchHistory,
}

impl Feature {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::RankingSearch => "ランキング検索",
            Self::CompetitorSearch => "競合詳細検索",
            Self::RealtimeSearch => "リアルタイム検索",
            Self::SearchHistory => "検索履歴",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Capability limits of one plan tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanLimits {
    pub ranking_search: Quota,
    pub competitor_search: Quota,
    /// `None` when the tier has no real-time search at all.
    pub realtime_search: Option<Quota>,
    pub history: HistoryRetention,
}

impl PlanLimits {
    #[must_use]
    pub const fn for_plan(plan: PlanTier) -> Self {
        match plan {
            PlanTier::Free => Self {
                ranking_search: Quota::Limited(3),
                competitor_search: Quota::Limited(3),
                realtime_search: None,
                history: HistoryRetention::None,
            },
            PlanTier::Standard => Self {
                ranking_search: Quota::Limited(30),
                competitor_search: Quota::Limited(30),
                realtime_search: Some(Quota::Limited(10)),
                history: HistoryRetention::Days(5),
            },
            PlanTier::Pro => Self {
                ranking_search: Quota::Unlimited,
                competitor_search: Quota::Unlimited,
                realtime_search: Some(Quota::Unlimited),
                history: HistoryRetention::Unlimited,
            },
        }
    }

    /// Monthly quota for a counted feature; `None` when unavailable or uncounted.
    #[must_use]
    pub fn quota(&self, feature: Feature) -> Option<Quota> {
        match feature {
            Feature::RankingSearch => Some(self.ranking_search),
            Feature::CompetitorSearch => Some(self.competitor_search),
            Feature::RealtimeSearch => self.realtime_search,
            Feature::SearchHistory => None,
        }
    }

    #[must_use]
    pub fn allows(&self, feature: Feature) -> bool {
        match feature {
            Feature::SearchHistory => self.history.is_available(),
            other => self.quota(other).is_some(),
        }
    }
}

/// Render instructions for a plan-gated action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionGate {
    pub enabled: bool,
    /// Button or link text, distinct for disabled actions.
    pub label: String,
    /// Upgrade hint shown next to a disabled action.
    pub notice: Option<String>,
}

/// Decide whether `feature` is usable on `plan` and how to present it.
#[must_use]
pub fn gate(plan: PlanTier, feature: Feature) -> ActionGate {
    let limits = PlanLimits::for_plan(plan);
    let name = feature.display_name();

    let gate = if !limits.allows(feature) {
        ActionGate {
            enabled: false,
            label: format!("{name}（スタンダード・プロ限定）"),
            notice: Some(format!("{name}はスタンダード・プロプランでご利用いただけます")),
        }
    } else if feature == Feature::SearchHistory {
        ActionGate { enabled: true, label: format!("{name}（{}）", limits.history.label()), notice: None }
    } else {
        let quota = limits.quota(feature).unwrap_or(Quota::Unlimited);
        ActionGate { enabled: true, label: format!("{name}（{}）", quota.label()), notice: None }
    };

    tracing::debug!(%plan, %feature, enabled = gate.enabled, "plan gate evaluated");
    gate
}

/// Pricing-page description of a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanInfo {
    pub tier: PlanTier,
    /// Monthly price in JPY.
    pub monthly_price: u32,
    /// Yearly price in JPY (two months free).
    pub annual_price: u32,
    pub features: &'static [&'static str],
    pub limitations: &'static [&'static str],
    pub popular: bool,
}

impl PlanInfo {
    /// Effective monthly price when billed yearly, rounded down.
    #[must_use]
    pub fn annual_monthly_price(&self) -> u32 {
        self.annual_price / 12
    }
}

pub static CATALOG: [PlanInfo; 3] = [
    PlanInfo {
        tier: PlanTier::Free,
        monthly_price: 0,
        annual_price: 0,
        features: &["ランキング検索（月3回）", "競合詳細検索（月3回）", "基本的な商品情報表示", "コミュニティサポート"],
        limitations: &["検索履歴保存なし", "リアルタイム検索なし", "詳細分析機能なし"],
        popular: false,
    },
    PlanInfo {
        tier: PlanTier::Standard,
        monthly_price: 2480,
        annual_price: 24800,
        features: &[
            "ランキング検索（月30回）",
            "競合詳細検索（月30回）",
            "検索履歴（5日間保存）",
            "リアルタイム検索（月10回）",
            "価格トレンド分析",
            "メールサポート",
        ],
        limitations: &["長期履歴保存なし", "高度な分析機能制限"],
        popular: true,
    },
    PlanInfo {
        tier: PlanTier::Pro,
        monthly_price: 3480,
        annual_price: 34800,
        features: &[
            "ランキング検索（無制限）",
            "競合詳細検索（無制限）",
            "検索履歴（無制限保存）",
            "リアルタイム検索（無制限）",
            "高度な分析ダッシュボード",
            "API アクセス",
            "優先サポート",
            "カスタムレポート",
        ],
        limitations: &[],
        popular: false,
    },
];

#[must_use]
pub fn plan_info(tier: PlanTier) -> &'static PlanInfo {
    match tier {
        PlanTier::Free => &CATALOG[0],
        PlanTier::Standard => &CATALOG[1],
        PlanTier::Pro => &CATALOG[2],
    }
}
