//! Competitor analysis page.
//!
//! Lists sellers competing on the user's products, ten at a time up to a
//! hundred. Opening a seller's analysis panel is a competitor-detail search
//! and is charged to the monthly quota; expanding a card is free.

#[cfg(test)]
#[path = "competitors_test.rs"]
mod competitors_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::config::{AuthConfig, SearchConfig};
use crate::net::types::User;
use crate::plan::{Feature, Quota};
use crate::services::usage::UsageLedger;
use crate::state::auth::AuthState;
use crate::state::competitors::{CompetitorListState, MAX_VISIBLE};
use crate::util::auth::install_unauth_redirect;
use crate::util::storage::Storage;
use crate::util::{clock, task};

use super::dashboard::{quota_notice, remaining_label};
use super::pricing::{format_yen, group_digits};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Up => "上昇",
            Self::Down => "下降",
            Self::Stable => "安定",
        }
    }

    fn css_modifier(self) -> &'static str {
        match self {
            Self::Up => "competitor-trend--up",
            Self::Down => "competitor-trend--down",
            Self::Stable => "competitor-trend--stable",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Competitor {
    pub id: String,
    pub name: String,
    /// Positive-feedback rate in percent.
    pub rating: u32,
    pub price: u32,
    pub sales_count: u32,
    pub last_seen: &'static str,
    pub trend: Trend,
}

struct Template {
    rating: u32,
    price: u32,
    sales_count: u32,
    last_seen: &'static str,
    trend: Trend,
}

const TEMPLATES: [Template; 10] = [
    Template { rating: 98, price: 2800, sales_count: 1250, last_seen: "2時間前", trend: Trend::Up },
    Template { rating: 85, price: 2700, sales_count: 890, last_seen: "1時間前", trend: Trend::Down },
    Template { rating: 92, price: 3200, sales_count: 2100, last_seen: "30分前", trend: Trend::Up },
    Template { rating: 88, price: 2950, sales_count: 1450, last_seen: "3時間前", trend: Trend::Stable },
    Template { rating: 95, price: 3100, sales_count: 1800, last_seen: "1時間前", trend: Trend::Up },
    Template { rating: 82, price: 2600, sales_count: 750, last_seen: "4時間前", trend: Trend::Down },
    Template { rating: 90, price: 2900, sales_count: 1350, last_seen: "2時間前", trend: Trend::Stable },
    Template { rating: 87, price: 3000, sales_count: 1100, last_seen: "1時間前", trend: Trend::Up },
    Template { rating: 93, price: 3300, sales_count: 1950, last_seen: "45分前", trend: Trend::Up },
    Template { rating: 89, price: 2850, sales_count: 1200, last_seen: "2時間前", trend: Trend::Stable },
];

/// Sample daily sales shown in every analysis panel: date, units, unit price.
pub(crate) const SALES_HISTORY: [(&str, u32, u32); 3] =
    [("2025-01-15", 45, 2800), ("2025-01-14", 38, 2850), ("2025-01-13", 52, 2750)];

/// Row `index` (zero-based) of the sample competitor list.
pub(crate) fn competitor_at(index: usize) -> Competitor {
    let t = &TEMPLATES[index % TEMPLATES.len()];
    Competitor {
        id: (index + 1).to_string(),
        name: format!("seller{:03}", index + 1),
        rating: t.rating,
        price: t.price,
        sales_count: t.sales_count,
        last_seen: t.last_seen,
        trend: t.trend,
    }
}

pub(crate) fn estimated_monthly_revenue(competitor: &Competitor) -> u64 {
    u64::from(competitor.price) * u64::from(competitor.sales_count)
}

/// Averages over the rows currently shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CompetitorStats {
    pub count: usize,
    pub average_price: u32,
    pub average_rating: f64,
    pub average_sales: u32,
}

pub(crate) fn summarize(competitors: &[Competitor]) -> CompetitorStats {
    let count = competitors.len();
    let n = u32::try_from(count).unwrap_or(u32::MAX);
    if n == 0 {
        return CompetitorStats { count, average_price: 0, average_rating: 0.0, average_sales: 0 };
    }
    let price: u64 = competitors.iter().map(|c| u64::from(c.price)).sum();
    let sales: u64 = competitors.iter().map(|c| u64::from(c.sales_count)).sum();
    let rating: u32 = competitors.iter().map(|c| c.rating).sum();
    CompetitorStats {
        count,
        average_price: u32::try_from(price / u64::from(n)).unwrap_or(u32::MAX),
        average_rating: f64::from(rating) / f64::from(n),
        average_sales: u32::try_from(sales / u64::from(n)).unwrap_or(u32::MAX),
    }
}

/// Open the analysis panel for `competitor_id`, charging one competitor-detail search.
pub(crate) fn open_analysis_at<S: Storage>(
    list: &mut CompetitorListState,
    ledger: &UsageLedger<S>,
    user: &User,
    competitor_id: &str,
    now_ms: i64,
) -> Result<Quota, String> {
    let quota = ledger
        .check_and_record_at(&user.id, Feature::CompetitorSearch, user.plan, now_ms)
        .map_err(|err| quota_notice(&err))?;
    list.selected = Some(competitor_id.to_owned());
    Ok(quota)
}

fn visible_competitors(list: &CompetitorListState) -> Vec<Competitor> {
    (0..list.visible).map(competitor_at).collect()
}

#[component]
fn AnalysisPanel(list: RwSignal<CompetitorListState>) -> impl IntoView {
    let selected = move || {
        let state = list.get();
        let id = state.selected.as_deref()?;
        visible_competitors(&state).into_iter().find(|c| c.id == id)
    };

    view! {
        <Show when=move || selected().is_some()>
            {move || {
                selected()
                    .map(|c| {
                        view! {
                            <div class="competitor-analysis" role="dialog">
                                <header class="competitor-analysis__header">
                                    <h2>{format!("{} - 詳細分析", c.name)}</h2>
                                    <button on:click=move |_| list.update(CompetitorListState::close_analysis)>
                                        "閉じる"
                                    </button>
                                </header>
                                <div class="competitor-analysis__metrics">
                                    <div>
                                        <span>"売上推移"</span>
                                        <strong>{format!("¥{}", group_digits(estimated_monthly_revenue(&c)))}</strong>
                                        <small>"月間推定売上"</small>
                                    </div>
                                    <div>
                                        <span>"活動状況"</span>
                                        <strong>"95%"</strong>
                                        <small>"アクティブ率"</small>
                                    </div>
                                </div>
                                <section>
                                    <h3>"価格推移（過去30日）"</h3>
                                    <p class="competitor-analysis__chart">"チャートデータを読み込み中..."</p>
                                </section>
                                <section>
                                    <h3>"販売履歴"</h3>
                                    <ul>
                                        {SALES_HISTORY
                                            .into_iter()
                                            .map(|(date, units, price)| {
                                                view! {
                                                    <li>
                                                        <span>{date}</span>
                                                        <span>{format!("{units}個販売")}</span>
                                                        <span>{format_yen(price)}</span>
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                </section>
                            </div>
                        }
                    })
            }}
        </Show>
    }
}

#[component]
pub fn CompetitorsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let landing = expect_context::<AuthConfig>().landing_path;
    let search_config = expect_context::<SearchConfig>();
    let ledger = StoredValue::new(expect_context::<UsageLedger>());
    install_unauth_redirect(auth, use_navigate(), landing);

    let list = RwSignal::new(CompetitorListState::default());
    let notice = RwSignal::new(None::<String>);
    let usage_rev = RwSignal::new(0_u64);

    let open_analysis = move |id: String| {
        let Some(user) = auth.get_untracked().user else {
            return;
        };
        let now = clock::now_ms();
        match list.try_update(|l| ledger.with_value(|ledger| open_analysis_at(l, ledger, &user, &id, now))) {
            Some(Ok(_)) => {
                notice.set(None);
                usage_rev.update(|rev| *rev += 1);
                tracing::info!(user_id = %user.id, competitor = %id, "competitor analysis opened");
            }
            Some(Err(message)) => notice.set(Some(message)),
            None => {}
        }
    };

    let load_more = move |_| {
        if !list.try_update(CompetitorListState::begin_load_more).unwrap_or(false) {
            return;
        }
        let latency = search_config.load_more_latency;
        task::spawn(async move {
            clock::sleep(latency).await;
            list.update(CompetitorListState::finish_load_more);
        });
    };

    let remaining = move || {
        usage_rev.track();
        let user = auth.get().user?;
        ledger
            .with_value(|l| l.remaining(&user.id, Feature::CompetitorSearch, user.plan))
            .map(remaining_label)
    };
    let stats = move || summarize(&visible_competitors(&list.get()));

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().user.is_some()
            fallback=move || view! { <div class="competitors-page competitors-page--loading">"読み込み中..."</div> }
        >
            <div class="competitors-page">
                <header class="competitors-header">
                    <a href="/dashboard">"ダッシュボード"</a>
                    <h1>"競合分析"</h1>
                    <span class="competitors-header__count">
                        {move || format!("{}/{MAX_VISIBLE} 表示中", list.get().visible)}
                    </span>
                </header>

                <div class="competitors-stats">
                    <div><strong>{move || stats().count}</strong><span>"競合者数"</span></div>
                    <div><strong>{move || format_yen(stats().average_price)}</strong><span>"平均価格"</span></div>
                    <div><strong>{move || format!("{:.1}%", stats().average_rating)}</strong><span>"平均評価"</span></div>
                    <div><strong>{move || group_digits(u64::from(stats().average_sales))}</strong><span>"平均売上"</span></div>
                </div>

                <p class="competitors-quota">
                    {move || remaining().map(|r| format!("競合詳細検索: {r}")).unwrap_or_default()}
                </p>
                <Show when=move || notice.get().is_some()>
                    <p class="competitors-notice">
                        {move || notice.get().unwrap_or_default()}
                        " " <a href="/account/plan">"アップグレード"</a>
                    </p>
                </Show>

                <ul class="competitors-list">
                    {move || {
                        visible_competitors(&list.get())
                            .into_iter()
                            .map(|c| {
                                let toggle_id = c.id.clone();
                                let expanded_id = c.id.clone();
                                let analysis_id = c.id.clone();
                                view! {
                                    <li class="competitor-card">
                                        <h3>{c.name.clone()}</h3>
                                        <span class="competitor-card__rating">{format!("{}%", c.rating)}</span>
                                        <dl>
                                            <dt>"価格"</dt><dd>{format_yen(c.price)}</dd>
                                            <dt>"売上数"</dt><dd>{group_digits(u64::from(c.sales_count))}</dd>
                                            <dt>"最終確認"</dt><dd>{c.last_seen}</dd>
                                            <dt>"トレンド"</dt>
                                            <dd class=format!("competitor-trend {}", c.trend.css_modifier())>{c.trend.label()}</dd>
                                        </dl>
                                        <button on:click=move |_| list.update(|l| l.toggle(&toggle_id))>"詳細"</button>
                                        <button on:click=move |_| open_analysis(analysis_id.clone())>"分析"</button>
                                        <Show when=move || list.get().is_expanded(&expanded_id)>
                                            <div class="competitor-card__details">
                                                <section>
                                                    <h4>"最近の活動"</h4>
                                                    <ul>
                                                        <li>"価格を¥50値下げ（2時間前）"</li>
                                                        <li>"在庫を30個追加（1日前）"</li>
                                                        <li>"商品説明を更新（3日前）"</li>
                                                    </ul>
                                                </section>
                                                <section>
                                                    <h4>"競合優位性"</h4>
                                                    <ul>
                                                        <li>{format!("高評価率: {}%", c.rating)}</li>
                                                        <li>"迅速な発送対応"</li>
                                                        <li>"豊富な商品バリエーション"</li>
                                                    </ul>
                                                </section>
                                                <section>
                                                    <h4>"注意点"</h4>
                                                    <ul>
                                                        <li>"価格変動が頻繁"</li>
                                                        <li>"在庫切れが多い"</li>
                                                        <li>"レビュー対応が遅い"</li>
                                                    </ul>
                                                </section>
                                            </div>
                                        </Show>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>

                <Show when=move || list.get().has_more()>
                    <button class="competitors-more" on:click=load_more disabled=move || list.get().loading>
                        {move || {
                            let state = list.get();
                            if state.loading {
                                "読み込み中...".to_owned()
                            } else {
                                format!("さらに表示 ({}件)", state.next_batch())
                            }
                        }}
                    </button>
                </Show>

                <AnalysisPanel list=list/>
            </div>
        </Show>
    }
}
