//! Registration page: account details, plan choice and consents.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::app::AppAuthService;
use crate::net::types::PlanTier;
use crate::plan::plan_info;
use crate::services::auth::AuthError;
use crate::services::validation::{RegistrationErrors, RegistrationField, RegistrationForm};
use crate::state::auth::AuthState;
use crate::state::form::{FormState, FormStatus};
use crate::util::auth as auth_util;
use crate::util::{clock, task};

use super::pricing::format_yen;

/// Banner text for a failed registration. Conflicts keep their own message.
pub(crate) fn registration_failure_message(err: &AuthError) -> String {
    match err {
        AuthError::DuplicateEmail => err.to_string(),
        _ => "登録に失敗しました".to_owned(),
    }
}

pub(crate) fn success_message(plan: PlanTier) -> String {
    format!("{}プランでアカウントの作成が完了しました。", plan.display_name())
}

#[component]
fn FieldError(errors: RwSignal<RegistrationErrors>, field: RegistrationField) -> impl IntoView {
    let message = move || errors.get().get(field).map(str::to_owned);
    view! {
        <Show when=move || message().is_some()>
            <p class="register-field__error">{move || message().unwrap_or_default()}</p>
        </Show>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let service = StoredValue::new(expect_context::<AppAuthService>());
    let input = RwSignal::new(RegistrationForm::default());
    let errors = RwSignal::new(RegistrationErrors::default());
    let form = RwSignal::new(FormState::default());

    // Editing a field retracts its error.
    let edit = move |field: RegistrationField, apply: fn(&mut RegistrationForm, String), value: String| {
        input.update(|f| apply(f, value));
        errors.update(|e| e.clear(field));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = match input.get().validate() {
            Ok(request) => request,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        if !form.try_update(FormState::begin).unwrap_or(false) {
            return;
        }
        errors.set(RegistrationErrors::default());
        let service = service.get_value();
        task::spawn(async move {
            match service.register_user(request).await {
                Ok(user) => {
                    auth_util::enter_session(auth, user);
                    form.update(FormState::succeed);
                    clock::sleep(service.config().registration_redirect_delay).await;
                    auth_util::hard_navigate(&service.config().home_path);
                }
                Err(err) => {
                    errors.set(RegistrationErrors::general(registration_failure_message(&err)));
                    form.update(|f| f.fail(registration_failure_message(&err)));
                }
            }
        });
    };

    let on_google = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        if !form.try_update(FormState::begin).unwrap_or(false) {
            return;
        }
        let service = service.get_value();
        task::spawn(async move {
            match service.authenticate_with_google().await {
                Ok(user) => {
                    auth_util::enter_session(auth, user);
                    form.update(FormState::succeed);
                    auth_util::hard_navigate(&service.config().home_path);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "google sign-up failed");
                    errors.set(RegistrationErrors::general(super::login::GOOGLE_FAILED));
                    form.update(|f| f.fail(super::login::GOOGLE_FAILED));
                }
            }
        });
    };

    let succeeded = move || form.get().status == FormStatus::Redirecting;

    view! {
        <Show
            when=move || !succeeded()
            fallback=move || {
                view! {
                    <div class="register-page register-page--done">
                        <h2>"登録完了！"</h2>
                        <p>{move || success_message(input.get().plan)}</p>
                        <p>"7日間の無料トライアルをお楽しみください。"</p>
                        <p class="register-page__hint">"ダッシュボードに移動中..."</p>
                    </div>
                }
            }
        >
            <div class="register-page">
                <a href="/" class="login-back">"ホームに戻る"</a>
                <h1>"セラーナビ"</h1>
                <p class="login-card__subtitle">"アカウントを作成して7日間無料でお試しください"</p>
                <button class="login-button login-button--google" type="button" on:click=on_google
                    disabled=move || form.get().is_busy()>
                    "Googleで登録"
                </button>
                <Show when=move || errors.get().general.is_some()>
                    <p class="login-message login-message--error">
                        {move || errors.get().general.unwrap_or_default()}
                    </p>
                </Show>
                <form class="register-form" on:submit=on_submit>
                    <label for="name">"お名前"</label>
                    <input id="name" class="login-input" type="text" placeholder="山田太郎"
                        prop:value=move || input.get().name
                        on:input=move |ev| edit(RegistrationField::Name, |f, v| f.name = v, event_target_value(&ev))/>
                    <FieldError errors=errors field=RegistrationField::Name/>

                    <label for="email">"メールアドレス"</label>
                    <input id="email" class="login-input" type="email" placeholder="your@email.com"
                        prop:value=move || input.get().email
                        on:input=move |ev| edit(RegistrationField::Email, |f, v| f.email = v, event_target_value(&ev))/>
                    <FieldError errors=errors field=RegistrationField::Email/>

                    <label for="phone">"電話番号"</label>
                    <input id="phone" class="login-input" type="tel" placeholder="090-1234-5678"
                        prop:value=move || input.get().phone
                        on:input=move |ev| edit(RegistrationField::Phone, |f, v| f.phone = v, event_target_value(&ev))/>
                    <FieldError errors=errors field=RegistrationField::Phone/>

                    <label for="password">"パスワード"</label>
                    <input id="password" class="login-input" type="password" placeholder="8文字以上"
                        prop:value=move || input.get().password
                        on:input=move |ev| edit(RegistrationField::Password, |f, v| f.password = v, event_target_value(&ev))/>
                    <FieldError errors=errors field=RegistrationField::Password/>

                    <label for="confirm">"パスワード確認"</label>
                    <input id="confirm" class="login-input" type="password"
                        prop:value=move || input.get().confirm_password
                        on:input=move |ev| edit(RegistrationField::ConfirmPassword, |f, v| f.confirm_password = v, event_target_value(&ev))/>
                    <FieldError errors=errors field=RegistrationField::ConfirmPassword/>

                    <fieldset class="register-plans">
                        <legend>"プランを選択"</legend>
                        {PlanTier::ALL
                            .into_iter()
                            .map(|tier| {
                                let info = plan_info(tier);
                                view! {
                                    <label class="register-plan" class:register-plan--popular=info.popular>
                                        <input type="radio" name="plan"
                                            prop:checked=move || input.get().plan == tier
                                            on:change=move |_| input.update(|f| f.plan = tier)/>
                                        <span>{tier.display_name()}</span>
                                        <span class="register-plan__price">{format!("{}/月", format_yen(info.monthly_price))}</span>
                                    </label>
                                }
                            })
                            .collect_view()}
                    </fieldset>

                    <label class="register-check">
                        <input type="checkbox" prop:checked=move || input.get().agree_to_terms
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                input.update(|f| f.agree_to_terms = checked);
                                errors.update(|e| e.clear(RegistrationField::Terms));
                            }/>
                        <a href="/terms">"利用規約"</a>"に同意します"
                    </label>
                    <label class="register-check">
                        <input type="checkbox" prop:checked=move || input.get().agree_to_privacy
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                input.update(|f| f.agree_to_privacy = checked);
                                errors.update(|e| e.clear(RegistrationField::Terms));
                            }/>
                        <a href="/privacy">"プライバシーポリシー"</a>"に同意します"
                    </label>
                    <FieldError errors=errors field=RegistrationField::Terms/>
                    <label class="register-check">
                        <input type="checkbox" prop:checked=move || input.get().agree_to_marketing
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                input.update(|f| f.agree_to_marketing = checked);
                            }/>
                        "お得な情報やキャンペーンのお知らせを受け取る"
                    </label>

                    <button class="login-button" type="submit" disabled=move || form.get().is_busy()>
                        {move || if form.get().is_busy() { "アカウント作成中..." } else { "アカウントを作成" }}
                    </button>
                </form>
                <p class="login-footer">
                    "既にアカウントをお持ちの方は " <a href="/login">"ログイン"</a>
                </p>
            </div>
        </Show>
    }
}
