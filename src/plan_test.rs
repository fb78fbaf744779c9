use super::*;

#[test]
fn free_tier_limits() {
    let limits = PlanLimits::for_plan(PlanTier::Free);
    assert_eq!(limits.ranking_search, Quota::Limited(3));
    assert_eq!(limits.competitor_search, Quota::Limited(3));
    assert_eq!(limits.realtime_search, None);
    assert_eq!(limits.history, HistoryRetention::None);
}

#[test]
fn standard_tier_limits() {
    let limits = PlanLimits::for_plan(PlanTier::Standard);
    assert_eq!(limits.ranking_search, Quota::Limited(30));
    assert_eq!(limits.competitor_search, Quota::Limited(30));
    assert_eq!(limits.realtime_search, Some(Quota::Limited(10)));
    assert_eq!(limits.history, HistoryRetention::Days(5));
}

#[test]
fn pro_tier_is_unlimited() {
    let limits = PlanLimits::for_plan(PlanTier::Pro);
    assert_eq!(limits.ranking_search, Quota::Unlimited);
    assert_eq!(limits.competitor_search, Quota::Unlimited);
    assert_eq!(limits.realtime_search, Some(Quota::Unlimited));
    assert_eq!(limits.history, HistoryRetention::Unlimited);
}

#[test]
fn free_user_sees_realtime_search_disabled_with_distinct_label() {
    let gate = gate(PlanTier::Free, Feature::RealtimeSearch);
    assert!(!gate.enabled);
    assert!(gate.label.contains("限定"));
    assert_eq!(
        gate.notice.as_deref(),
        Some("リアルタイム検索はスタンダード・プロプランでご利用いただけます")
    );
}

#[test]
fn standard_user_sees_realtime_search_enabled_with_quota_label() {
    let gate = gate(PlanTier::Standard, Feature::RealtimeSearch);
    assert!(gate.enabled);
    assert_eq!(gate.label, "リアルタイム検索（月10回）");
    assert!(gate.notice.is_none());
}

#[test]
fn pro_user_sees_unlimited_labels() {
    assert_eq!(gate(PlanTier::Pro, Feature::RealtimeSearch).label, "リアルタイム検索（無制限）");
    assert_eq!(gate(PlanTier::Pro, Feature::SearchHistory).label, "検索履歴（無制限保存）");
}

#[test]
fn history_gate_follows_retention() {
    assert!(!gate(PlanTier::Free, Feature::SearchHistory).enabled);
    let standard = gate(PlanTier::Standard, Feature::SearchHistory);
    assert!(standard.enabled);
    assert_eq!(standard.label, "検索履歴（5日間保存）");
}

#[test]
fn counted_searches_are_always_enabled() {
    for plan in PlanTier::ALL {
        assert!(gate(plan, Feature::RankingSearch).enabled);
        assert!(gate(plan, Feature::CompetitorSearch).enabled);
    }
    assert_eq!(gate(PlanTier::Free, Feature::RankingSearch).label, "ランキング検索（月3回）");
}

#[test]
fn quota_allows_until_limit() {
    let quota = Quota::Limited(3);
    assert!(quota.allows(2));
    assert!(!quota.allows(3));
    assert_eq!(quota.remaining(1), Quota::Limited(2));
    assert_eq!(quota.remaining(9), Quota::Limited(0));
    assert!(Quota::Unlimited.allows(u32::MAX));
}

#[test]
fn catalog_is_ordered_by_tier() {
    for (info, tier) in CATALOG.iter().zip(PlanTier::ALL) {
        assert_eq!(info.tier, tier);
        assert_eq!(plan_info(tier), info);
    }
    assert!(plan_info(PlanTier::Standard).popular);
    assert_eq!(plan_info(PlanTier::Standard).annual_monthly_price(), 2066);
    assert!(plan_info(PlanTier::Pro).limitations.is_empty());
}

#[test]
fn retention_window_decides_what_history_is_kept() {
    let now = 100 * DAY_MS;
    assert!(!HistoryRetention::None.keeps(now, now));
    assert!(HistoryRetention::Days(5).keeps(now - 5 * DAY_MS + 1, now));
    assert!(!HistoryRetention::Days(5).keeps(now - 5 * DAY_MS, now));
    assert!(HistoryRetention::Unlimited.keeps(0, now));
}
