//! Public pricing page with a monthly / yearly billing toggle.

#[cfg(test)]
#[path = "pricing_test.rs"]
mod pricing_test;

use leptos::prelude::*;

use crate::net::types::PlanTier;
use crate::plan::{CATALOG, PlanInfo};

/// Decimal digits with a comma every three places.
pub(crate) fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `¥` amount with thousands separators.
pub(crate) fn format_yen(amount: u32) -> String {
    format!("¥{}", group_digits(u64::from(amount)))
}

/// Headline price of `info` for the chosen billing period.
pub(crate) fn price_label(info: &PlanInfo, annual: bool) -> String {
    if annual {
        format_yen(info.annual_monthly_price())
    } else {
        format_yen(info.monthly_price)
    }
}

/// Yearly total shown under the headline price, only when billed yearly.
pub(crate) fn annual_total_label(info: &PlanInfo, annual: bool) -> Option<String> {
    (annual && info.annual_price > 0).then(|| format!("年額: {}", format_yen(info.annual_price)))
}

pub(crate) fn call_to_action(tier: PlanTier) -> &'static str {
    match tier {
        PlanTier::Free => "無料で始める",
        PlanTier::Standard | PlanTier::Pro => "7日間無料で試す",
    }
}

#[component]
pub fn PricingPage() -> impl IntoView {
    let annual = RwSignal::new(false);

    view! {
        <div class="pricing-page">
            <header class="pricing-header">
                <h1>"セラーナビ"</h1>
                <a href="/login" class="pricing-header__login">"ログイン"</a>
            </header>
            <h2>"シンプルな料金プラン"</h2>
            <div class="pricing-toggle">
                <span class:pricing-toggle--active=move || !annual.get()>"月額"</span>
                <button
                    class="pricing-toggle__switch"
                    class:pricing-toggle__switch--on=move || annual.get()
                    on:click=move |_| annual.update(|a| *a = !*a)
                ></button>
                <span class:pricing-toggle--active=move || annual.get()>"年額" <small>"2ヶ月分お得"</small></span>
            </div>
            <div class="pricing-grid">
                {CATALOG
                    .iter()
                    .map(|info| {
                        view! {
                            <div class="pricing-card" class:pricing-card--popular=info.popular>
                                <Show when=move || info.popular>
                                    <span class="pricing-card__badge">"人気"</span>
                                </Show>
                                <h3>{info.tier.display_name()}</h3>
                                <p class="pricing-card__price">
                                    {move || price_label(info, annual.get())}
                                    <span>"/月"</span>
                                </p>
                                <Show when=move || annual_total_label(info, annual.get()).is_some()>
                                    <p class="pricing-card__annual">
                                        {move || annual_total_label(info, annual.get()).unwrap_or_default()}
                                    </p>
                                </Show>
                                <ul class="pricing-card__features">
                                    {info.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
                                </ul>
                                <ul class="pricing-card__limitations">
                                    {info.limitations.iter().map(|l| view! { <li>{*l}</li> }).collect_view()}
                                </ul>
                                <a href="/register" class="login-button">{call_to_action(info.tier)}</a>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
