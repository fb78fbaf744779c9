//! Plan change page for signed-in users.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppAuthService;
use crate::net::types::PlanTier;
use crate::plan::CATALOG;
use crate::state::auth::AuthState;
use crate::state::form::FormState;
use crate::util::auth::{enter_session, hard_navigate, install_unauth_redirect};
use crate::util::task;

use super::pricing::format_yen;

pub(crate) fn plan_updated_message(tier: PlanTier) -> String {
    format!("{}プランに更新しました！", tier.display_name())
}

pub(crate) fn plan_change_failed_message() -> &'static str {
    "プランの更新に失敗しました"
}

#[component]
pub fn PlanPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let service = StoredValue::new(expect_context::<AppAuthService>());
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate, service.with_value(|s| s.config().landing_path.clone()));

    let form = RwSignal::new(FormState::default());
    let message = RwSignal::new(None::<String>);
    let current = move || auth.get().plan().unwrap_or_default();

    let change = move |tier: PlanTier| {
        let Some(user) = auth.get_untracked().user else {
            return;
        };
        if !form.try_update(FormState::begin).unwrap_or(false) {
            return;
        }
        message.set(None);
        let service = service.get_value();
        task::spawn(async move {
            match service.change_plan(&user, tier).await {
                Ok(updated) => {
                    // The token carries the plan, so reissue the session.
                    enter_session(auth, updated);
                    form.update(FormState::succeed);
                    message.set(Some(plan_updated_message(tier)));
                    hard_navigate(&service.config().home_path);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "plan change failed");
                    form.update(|f| f.fail(plan_change_failed_message()));
                }
            }
        });
    };

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().user.is_some()
            fallback=move || view! { <div class="plan-page plan-page--loading">"読み込み中..."</div> }
        >
            <div class="plan-page">
                <header class="plan-header">
                    <a href="/dashboard">"ダッシュボード"</a>
                    <h1>"プラン更新"</h1>
                    <span class="plan-header__current">{move || format!("{}プラン", current().display_name())}</span>
                </header>
                <p>{move || format!("現在の{}プランから、最適なプランをお選びください", current().display_name())}</p>
                <Show when=move || message.get().or_else(|| form.get().error).is_some()>
                    <p class="plan-page__message">{move || message.get().or_else(|| form.get().error).unwrap_or_default()}</p>
                </Show>
                <div class="plan-grid">
                    {CATALOG
                        .iter()
                        .map(|info| {
                            let tier = info.tier;
                            view! {
                                <div class="plan-card" class:plan-card--popular=info.popular>
                                    <h3>{tier.display_name()}</h3>
                                    <p class="plan-card__price">
                                        {format_yen(info.monthly_price)}
                                        <Show when=move || { info.monthly_price > 0 }>
                                            <span>"/月"</span>
                                        </Show>
                                    </p>
                                    <ul>{info.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}</ul>
                                    <Show
                                        when=move || current() != tier
                                        fallback=|| view! { <span class="plan-card__current">"現在のプラン"</span> }
                                    >
                                        <button
                                            class="login-button"
                                            disabled=move || form.get().is_busy()
                                            on:click=move |_| change(tier)
                                        >
                                            {move || if form.get().is_busy() { "更新中..." } else { "このプランに変更" }}
                                        </button>
                                    </Show>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </Show>
    }
}
