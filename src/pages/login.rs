//! Login page supporting email + password and Google sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::app::AppAuthService;
use crate::state::auth::AuthState;
use crate::state::form::{FormState, FormStatus};
use crate::util::auth as auth_util;
use crate::util::task;

pub(crate) const INVALID_CREDENTIALS: &str = "メールアドレスまたはパスワードが正しくありません";
pub(crate) const GOOGLE_FAILED: &str = "Google認証に失敗しました";

/// Trim the email and require both fields before calling the service.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("メールアドレスとパスワードを入力してください");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let service = expect_context::<AppAuthService>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form = RwSignal::new(FormState::default());
    let google = RwSignal::new(FormState::default());

    let login_service = service.clone();
    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(input) => input,
            Err(message) => {
                form.update(|f| f.error = Some(message.to_owned()));
                return;
            }
        };
        if !form.try_update(FormState::begin).unwrap_or(false) {
            return;
        }
        let service = login_service.clone();
        task::spawn(async move {
            match service.authenticate_user(&email_value, &password_value).await {
                Some(user) => {
                    auth_util::enter_session(auth, user);
                    form.update(FormState::succeed);
                    auth_util::hard_navigate(&service.config().home_path);
                }
                None => form.update(|f| f.fail(INVALID_CREDENTIALS)),
            }
        });
    };

    let on_google = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        if !google.try_update(FormState::begin).unwrap_or(false) {
            return;
        }
        let service = service.clone();
        task::spawn(async move {
            match service.authenticate_with_google().await {
                Ok(user) => {
                    auth_util::enter_session(auth, user);
                    google.update(FormState::succeed);
                    auth_util::hard_navigate(&service.config().home_path);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "google sign-in failed");
                    google.update(|g| g.fail(GOOGLE_FAILED));
                }
            }
        });
    };

    let error = move || form.get().error.or_else(|| google.get().error);

    view! {
        <div class="login-page">
            <div class="login-card">
                <a href="/" class="login-back">"ホームに戻る"</a>
                <h1>"セラーナビ"</h1>
                <p class="login-card__subtitle">"アカウントにログインしてください"</p>
                <button
                    class="login-button login-button--google"
                    type="button"
                    on:click=on_google
                    disabled=move || google.get().is_busy()
                >
                    {move || if google.get().is_busy() { "認証中..." } else { "Googleでログイン" }}
                </button>
                <div class="login-divider"><span>"または"</span></div>
                <Show when=move || error().is_some()>
                    <p class="login-message login-message--error">{move || error().unwrap_or_default()}</p>
                </Show>
                <form class="login-form" on:submit=on_login>
                    <label for="email">"メールアドレス"</label>
                    <input
                        id="email"
                        class="login-input"
                        type="email"
                        placeholder="your@email.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="password">"パスワード"</label>
                    <input
                        id="password"
                        class="login-input"
                        type="password"
                        placeholder="パスワードを入力"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || form.get().is_busy()>
                        {move || match form.get().status {
                            FormStatus::Idle => "ログイン",
                            FormStatus::Submitting => "ログイン中...",
                            FormStatus::Redirecting => "移動中...",
                        }}
                    </button>
                </form>
                <p class="login-footer">
                    "アカウントをお持ちでない方は " <a href="/register">"新規登録"</a>
                </p>
                <p class="login-footer login-footer--note">"7日間無料トライアル付き"</p>
            </div>
        </div>
    }
}
