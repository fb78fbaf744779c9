//! Dashboard page: product search with plan-gated real-time search.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated home route. Every search consumes the user's
//! monthly quota through the shared `UsageLedger`; the real-time button and
//! the history panel are rendered from the plan gate so free users see them
//! disabled with an upgrade notice instead of a failing click.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::config::{AuthConfig, SearchConfig};
use crate::net::types::{DAY_MS, User};
use crate::plan::{self, Feature, PlanLimits, Quota};
use crate::services::usage::{QuotaError, UsageLedger};
use crate::state::auth::AuthState;
use crate::state::search::{
    HistoryEntry, SearchHistory, SearchKind, SearchState, SearchStatus, freshness_label,
};
use crate::util::auth::{install_unauth_redirect, logout_and_leave};
use crate::util::storage::Storage;
use crate::util::{clock, task};

use super::pricing::format_yen;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// Product row shown until real search results exist.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SampleProduct {
    pub title: &'static str,
    pub price: u32,
    pub category: &'static str,
    pub subcategory: &'static str,
    pub sales_count: u32,
    pub rating: f32,
    pub hours_since_update: i64,
}

pub(crate) const SAMPLE_PRODUCTS: [SampleProduct; 3] = [
    SampleProduct {
        title: "ファッション レディース ワンピース",
        price: 2980,
        category: "ファッション",
        subcategory: "レディース > ワンピース",
        sales_count: 150,
        rating: 4.5,
        hours_since_update: 2,
    },
    SampleProduct {
        title: "中国製 スマートフォンケース iPhone用",
        price: 1580,
        category: "家電・スマホ",
        subcategory: "スマートフォン > アクセサリー",
        sales_count: 89,
        rating: 4.2,
        hours_since_update: 5,
    },
    SampleProduct {
        title: "海外ブランド キッチン用品セット",
        price: 4200,
        category: "ホーム・キッチン",
        subcategory: "キッチン用品 > 調理器具",
        sales_count: 67,
        rating: 4.8,
        hours_since_update: 1,
    },
];

pub(crate) const TIME_PERIODS: [u32; 5] = [7, 14, 30, 60, 90];

/// Message shown when the ledger refuses a search.
pub(crate) fn quota_notice(err: &QuotaError) -> String {
    match err {
        QuotaError::Unavailable { feature, .. } => {
            format!("{feature}はスタンダード・プロプランでご利用いただけます")
        }
        QuotaError::Exhausted { feature, limit } => {
            format!("今月の{feature}の上限（{limit}回）に達しました")
        }
    }
}

pub(crate) fn remaining_label(quota: Quota) -> String {
    match quota {
        Quota::Limited(n) => format!("今月の残り{n}回"),
        Quota::Unlimited => "無制限".to_owned(),
    }
}

/// Start a `kind` search for `user`, charging the ledger only once the search
/// state has accepted it. A refused charge leaves `search` as it was.
pub(crate) fn start_search_at<S: Storage>(
    search: &mut SearchState,
    ledger: &UsageLedger<S>,
    user: &User,
    kind: SearchKind,
    now_ms: i64,
) -> Result<Quota, String> {
    let before = search.clone();
    search.begin(kind, user.plan).map_err(|rejected| rejected.to_string())?;
    ledger
        .check_and_record_at(&user.id, kind.feature(), user.plan, now_ms)
        .map_err(|err| {
            *search = before;
            quota_notice(&err)
        })
}

pub(crate) fn history_kind_label(kind: SearchKind) -> &'static str {
    match kind {
        SearchKind::Normal => "通常",
        SearchKind::Realtime => "リアルタイム",
    }
}

pub(crate) fn searched_ago(at: i64, now_ms: i64) -> String {
    let minutes = (now_ms - at).max(0) / 60_000;
    match minutes {
        0 => "たった今".to_owned(),
        m if m < 60 => format!("{m}分前"),
        m if m < 24 * 60 => format!("{}時間前", m / 60),
        m => format!("{}日前", m / (24 * 60)),
    }
}

pub(crate) fn trial_notice(trial_ends_at: Option<i64>, now_ms: i64) -> Option<String> {
    let ends = trial_ends_at?;
    if now_ms >= ends {
        return None;
    }
    // Round partial days up so the last day reads "残り1日".
    let days = (ends - now_ms + DAY_MS - 1) / DAY_MS;
    Some(format!("無料トライアル期間中（残り{days}日）"))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let auth_config = StoredValue::new(expect_context::<AuthConfig>());
    let search_config = expect_context::<SearchConfig>();
    let ledger = StoredValue::new(expect_context::<UsageLedger>());
    let navigate = use_navigate();

    install_unauth_redirect(auth, navigate, auth_config.with_value(|c| c.landing_path.clone()));

    let search = RwSignal::new(SearchState::new(clock::now_ms()));
    let notice = RwSignal::new(None::<String>);
    let query = RwSignal::new(String::new());
    let period = RwSignal::new(30_u32);
    // Bumped after each recorded use so remaining-quota labels re-render.
    let usage_rev = RwSignal::new(0_u64);
    let history = RwSignal::new(SearchHistory::default());

    let plan = move || auth.get().plan().unwrap_or_default();

    let run_search = move |kind: SearchKind| {
        let Some(user) = auth.get_untracked().user else {
            return;
        };
        let now = clock::now_ms();
        match search.try_update(|s| ledger.with_value(|l| start_search_at(s, l, &user, kind, now))) {
            Some(Ok(_)) => {}
            Some(Err(message)) => {
                notice.set(Some(message));
                return;
            }
            None => return,
        }
        usage_rev.update(|rev| *rev += 1);
        notice.set(None);
        let query_text = query.get_untracked();
        let period_days = period.get_untracked();
        history.update(|h| {
            h.record(
                user.plan,
                HistoryEntry {
                    query: query_text.clone(),
                    kind,
                    period_days,
                    at: now,
                },
            );
        });
        tracing::info!(user_id = %user.id, ?kind, query = %query_text, period = period_days, "search started");

        let latency = kind.latency(&search_config);
        task::spawn(async move {
            clock::sleep(latency).await;
            search.update(|s| s.complete(clock::now_ms()));
        });
    };

    let on_refresh = move |_| {
        if !search.try_update(SearchState::begin_refresh).unwrap_or(false) {
            return;
        }
        let latency = search_config.refresh_latency;
        task::spawn(async move {
            clock::sleep(latency).await;
            search.update(|s| s.complete(clock::now_ms()));
        });
    };

    let on_logout = move |_| logout_and_leave(auth, &auth_config.with_value(|c| c.landing_path.clone()));

    let remaining = move |feature: Feature| {
        usage_rev.track();
        let user = auth.get().user?;
        ledger
            .with_value(|l| l.remaining(&user.id, feature, user.plan))
            .map(remaining_label)
    };

    let realtime_gate = move || plan::gate(plan(), Feature::RealtimeSearch);
    let history_gate = move || plan::gate(plan(), Feature::SearchHistory);
    let visible_history = move || history.get().visible(PlanLimits::for_plan(plan()).history, clock::now_ms());
    let searching = move || search.get().searching;

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().user.is_some()
            fallback=move || view! { <div class="dashboard-page dashboard-page--loading">"読み込み中..."</div> }
        >
            <div class="dashboard-page">
                <header class="dashboard-header">
                    <h1>"セラーナビ"</h1>
                    <span class="dashboard-header__user">
                        {move || auth.get().user.map(|u| u.name).unwrap_or_default()}
                    </span>
                    <span class="dashboard-header__plan">{move || plan().display_name()}</span>
                    <Show when=move || auth.get().user.and_then(|u| trial_notice(u.trial_ends_at, clock::now_ms())).is_some()>
                        <span class="dashboard-header__trial">
                            {move || {
                                auth.get()
                                    .user
                                    .and_then(|u| trial_notice(u.trial_ends_at, clock::now_ms()))
                                    .unwrap_or_default()
                            }}
                        </span>
                    </Show>
                    <a href="/competitors" class="dashboard-header__link">"競合分析"</a>
                    <a href="/account/plan" class="dashboard-header__link">"プラン変更"</a>
                    <a href="/account/settings" class="dashboard-header__link">"アカウント設定"</a>
                    <button class="dashboard-header__logout" on:click=on_logout>"ログアウト"</button>
                </header>

                <section class="dashboard-search">
                    <input
                        class="dashboard-search__query"
                        type="search"
                        placeholder="商品名やキーワードで検索"
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <select
                        class="dashboard-search__period"
                        on:change=move |ev| {
                            if let Ok(days) = event_target_value(&ev).parse::<u32>() {
                                period.set(days);
                            }
                        }
                    >
                        {TIME_PERIODS
                            .into_iter()
                            .map(|days| {
                                view! {
                                    <option value=days.to_string() selected=move || period.get() == days>
                                        {format!("過去{days}日間")}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <button
                        class="dashboard-search__button"
                        on:click=move |_| run_search(SearchKind::Normal)
                        disabled=searching
                    >
                        {move || plan::gate(plan(), Feature::RankingSearch).label}
                    </button>
                    <span class="dashboard-search__remaining">
                        {move || remaining(Feature::RankingSearch).unwrap_or_default()}
                    </span>
                    <button
                        class="dashboard-search__button dashboard-search__button--realtime"
                        on:click=move |_| run_search(SearchKind::Realtime)
                        disabled=move || searching() || !realtime_gate().enabled
                    >
                        {move || realtime_gate().label}
                    </button>
                    <Show when=move || realtime_gate().notice.is_some()>
                        <p class="dashboard-search__upgrade">
                            {move || realtime_gate().notice.unwrap_or_default()}
                            " " <a href="/account/plan">"アップグレード"</a>
                        </p>
                    </Show>
                    <Show when=move || notice.get().is_some()>
                        <p class="dashboard-search__notice">{move || notice.get().unwrap_or_default()}</p>
                    </Show>
                </section>

                <div
                    class="dashboard-status"
                    class:dashboard-status--fetching=move || search.get().status == SearchStatus::Fetching
                >
                    <span>{move || search.get().status_label(clock::now_ms())}</span>
                    <button class="dashboard-status__refresh" on:click=on_refresh disabled=searching>
                        "更新"
                    </button>
                </div>

                <section class="dashboard-history">
                    <h2>{move || history_gate().label}</h2>
                    <Show
                        when=move || history_gate().enabled
                        fallback=move || {
                            view! {
                                <p class="dashboard-history__upgrade">
                                    {move || history_gate().notice.unwrap_or_default()}
                                    " " <a href="/account/plan">"アップグレード"</a>
                                </p>
                            }
                        }
                    >
                        <Show
                            when=move || !visible_history().is_empty()
                            fallback=|| view! { <p class="dashboard-history__empty">"検索履歴はまだありません"</p> }
                        >
                            <ul class="dashboard-history__list">
                                {move || {
                                    visible_history()
                                        .into_iter()
                                        .map(|entry| {
                                            view! {
                                                <li>
                                                    <span>{history_kind_label(entry.kind)}</span>
                                                    " "
                                                    <span>{if entry.query.is_empty() { "（キーワードなし）".to_owned() } else { entry.query }}</span>
                                                    " "
                                                    <span>{format!("過去{}日間", entry.period_days)}</span>
                                                    " "
                                                    <span>{searched_ago(entry.at, clock::now_ms())}</span>
                                                </li>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </ul>
                        </Show>
                    </Show>
                </section>

                <ul class="dashboard-products">
                    {SAMPLE_PRODUCTS
                        .into_iter()
                        .map(|product| {
                            let updated_at = clock::now_ms() - product.hours_since_update * HOUR_MS;
                            view! {
                                <li class="dashboard-product">
                                    <h3>{product.title}</h3>
                                    <p class="dashboard-product__category">
                                        {format!("{} / {}", product.category, product.subcategory)}
                                    </p>
                                    <p class="dashboard-product__price">{format_yen(product.price)}</p>
                                    <p class="dashboard-product__meta">
                                        {format!("販売数 {} ・ 評価 {:.1}", product.sales_count, product.rating)}
                                    </p>
                                    <p class="dashboard-product__fresh">{freshness_label(updated_at, clock::now_ms())}</p>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </Show>
    }
}
