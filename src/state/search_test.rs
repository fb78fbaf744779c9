use super::*;

const NOW: i64 = 1_700_000_000_000;

#[test]
fn dashboard_opens_on_cache() {
    let state = SearchState::new(NOW);
    assert_eq!(state.status, SearchStatus::Cache);
    assert!(!state.searching);
    assert_eq!(state.status_label(NOW), "キャッシュから表示中 (0日前に更新)");
}

#[test]
fn normal_search_runs_to_completion() {
    let mut state = SearchState::new(NOW - 3 * DAY_MS);
    assert_eq!(state.status_label(NOW), "キャッシュから表示中 (3日前に更新)");
    state.begin(SearchKind::Normal, PlanTier::Free).unwrap();
    assert_eq!(state.status, SearchStatus::Fetching);
    assert_eq!(state.status_label(NOW), "新しいデータを取得中... (最大10秒)");

    state.complete(NOW);
    assert_eq!(state.status, SearchStatus::Complete);
    assert!(!state.searching);
    assert_eq!(state.status_label(NOW + 1000), "更新完了: 本日に取得したデータを表示");
    assert_eq!(state.status_label(NOW + 2 * DAY_MS), "更新完了: 2日前に取得したデータを表示");
}

#[test]
fn realtime_search_is_refused_on_free() {
    let mut state = SearchState::new(NOW);
    assert_eq!(
        state.begin(SearchKind::Realtime, PlanTier::Free),
        Err(SearchRejected::NotInPlan(Feature::RealtimeSearch))
    );
    assert_eq!(state.status, SearchStatus::Cache);
}

#[test]
fn realtime_search_runs_on_paid_plans() {
    for plan in [PlanTier::Standard, PlanTier::Pro] {
        let mut state = SearchState::new(NOW);
        state.begin(SearchKind::Realtime, plan).unwrap();
        assert_eq!(state.kind, SearchKind::Realtime);
        assert_eq!(state.status_label(NOW), "リアルタイム検索中... (最大30秒)");
    }
}

#[test]
fn second_search_is_refused_while_one_runs() {
    let mut state = SearchState::new(NOW);
    state.begin(SearchKind::Normal, PlanTier::Pro).unwrap();
    assert_eq!(state.can_begin(SearchKind::Normal, PlanTier::Pro), Err(SearchRejected::InFlight));
    assert_eq!(state.begin(SearchKind::Realtime, PlanTier::Pro), Err(SearchRejected::InFlight));
    assert_eq!(state.kind, SearchKind::Normal);
    assert!(!state.begin_refresh());
}

#[test]
fn refresh_fetches_without_claiming_the_search_slot() {
    let mut state = SearchState::new(NOW);
    assert!(state.begin_refresh());
    assert_eq!(state.status, SearchStatus::Fetching);
    assert!(!state.searching);
    state.complete(NOW + 5);
    assert_eq!(state.last_updated, NOW + 5);
}

#[test]
fn latencies_come_from_config() {
    let config = SearchConfig::default();
    assert_eq!(SearchKind::Normal.latency(&config), Duration::from_millis(3000));
    assert_eq!(SearchKind::Realtime.latency(&config), Duration::from_millis(5000));
    assert_eq!(config.refresh_latency, Duration::from_millis(2000));
}

#[test]
fn freshness_label_switches_from_hours_to_days() {
    assert_eq!(freshness_label(NOW - 30 * 60 * 1000, NOW), "1時間以内に更新");
    assert_eq!(freshness_label(NOW - 5 * HOUR_MS, NOW), "5時間前に更新");
    assert_eq!(freshness_label(NOW - 49 * HOUR_MS, NOW), "2日前に更新");
}

fn entry(query: &str, at: i64) -> HistoryEntry {
    HistoryEntry {
        query: query.to_owned(),
        kind: SearchKind::Normal,
        period_days: 30,
        at,
    }
}

#[test]
fn free_plan_keeps_no_history() {
    let mut history = SearchHistory::default();
    history.record(PlanTier::Free, entry("ワンピース", NOW));
    assert!(history.visible(HistoryRetention::Unlimited, NOW).is_empty());
}

#[test]
fn standard_history_hides_entries_older_than_five_days() {
    let mut history = SearchHistory::default();
    history.record(PlanTier::Standard, entry("古い", NOW - 6 * DAY_MS));
    history.record(PlanTier::Standard, entry("新しい", NOW - DAY_MS));

    let retention = PlanLimits::for_plan(PlanTier::Standard).history;
    let shown = history.visible(retention, NOW);
    assert_eq!(shown, vec![entry("新しい", NOW - DAY_MS)]);

    // Upgrading widens the window over the same entries.
    let pro = PlanLimits::for_plan(PlanTier::Pro).history;
    assert_eq!(history.visible(pro, NOW).len(), 2);
}
