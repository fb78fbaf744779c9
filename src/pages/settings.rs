//! Account settings: profile edits and account deletion.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::app::AppAuthService;
use crate::services::auth::{AuthError, AuthService, IdentityProvider};
use crate::services::session::SessionStore;
use crate::services::usage::UsageLedger;
use crate::services::users::UserRepository;
use crate::services::validation::{ProfileForm, RegistrationErrors, RegistrationField};
use crate::state::auth::AuthState;
use crate::state::form::FormState;
use crate::util::auth::{enter_session, hard_navigate, install_unauth_redirect};
use crate::util::storage::Storage;
use crate::util::task;

pub(crate) const SAVED: &str = "設定が正常に更新されました";
pub(crate) const DELETE_CONFIRM: &str = "本当にアカウントを削除しますか？この操作は取り消せません。";

pub(crate) fn save_failure_message(err: &AuthError) -> String {
    match err {
        AuthError::DuplicateEmail => err.to_string(),
        _ => "設定の更新に失敗しました".to_owned(),
    }
}

/// Delete `user_id`, then drop its usage counts and the stored session.
///
/// Nothing local is cleared when the service refuses.
pub(crate) async fn delete_account_and_session<R, P, S, L>(
    service: &AuthService<R, P>,
    store: &SessionStore<S>,
    ledger: &UsageLedger<L>,
    user_id: &str,
) -> Result<(), AuthError>
where
    R: UserRepository,
    P: IdentityProvider,
    S: Storage,
    L: Storage,
{
    service.delete_account(user_id).await?;
    ledger.forget(user_id);
    store.clear();
    Ok(())
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let service = StoredValue::new(expect_context::<AppAuthService>());
    let ledger = StoredValue::new(expect_context::<UsageLedger>());
    let landing = service.with_value(|s| s.config().landing_path.clone());
    install_unauth_redirect(auth, use_navigate(), landing.clone());
    let landing = StoredValue::new(landing);

    let input = RwSignal::new(ProfileForm::default());
    let errors = RwSignal::new(RegistrationErrors::default());
    let save = RwSignal::new(FormState::default());
    let delete = RwSignal::new(FormState::default());
    let saved = RwSignal::new(false);
    let confirming = RwSignal::new(false);

    // Prefill once the session is known.
    let prefilled = RwSignal::new(false);
    Effect::new(move || {
        if prefilled.get_untracked() {
            return;
        }
        if let Some(user) = auth.get().user {
            input.set(ProfileForm::from_user(&user));
            prefilled.set(true);
        }
    });

    let edit = move |field: RegistrationField, apply: fn(&mut ProfileForm, String), value: String| {
        input.update(|f| apply(f, value));
        errors.update(|e| e.clear(field));
        saved.set(false);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(user) = auth.get_untracked().user else {
            return;
        };
        let update = match input.get_untracked().validate() {
            Ok(update) => update,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        if !save.try_update(FormState::begin).unwrap_or(false) {
            return;
        }
        saved.set(false);
        let service = service.get_value();
        task::spawn(async move {
            match service.update_profile(&user, update).await {
                Ok(updated) => {
                    // The token carries the email, so reissue the session.
                    enter_session(auth, updated);
                    save.update(FormState::settle);
                    saved.set(true);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "profile update failed");
                    save.update(|f| f.fail(save_failure_message(&err)));
                }
            }
        });
    };

    let on_delete = move |_| {
        let Some(user) = auth.get_untracked().user else {
            return;
        };
        if !delete.try_update(FormState::begin).unwrap_or(false) {
            return;
        }
        confirming.set(false);
        let service = service.get_value();
        let ledger = ledger.get_value();
        task::spawn(async move {
            let store = SessionStore::browser();
            match delete_account_and_session(&service, &store, &ledger, &user.id).await {
                Ok(()) => {
                    auth.update(AuthState::sign_out);
                    delete.update(FormState::succeed);
                    hard_navigate(&landing.get_value());
                }
                Err(err) => {
                    tracing::warn!(error = %err, "account deletion failed");
                    delete.update(|f| f.fail("アカウントの削除に失敗しました"));
                }
            }
        });
    };

    let banner = move || {
        if saved.get() {
            Some(SAVED.to_owned())
        } else {
            save.get().error.or_else(|| delete.get().error)
        }
    };

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().user.is_some()
            fallback=move || view! { <div class="settings-page settings-page--loading">"読み込み中..."</div> }
        >
            <div class="settings-page">
                <header class="settings-header">
                    <a href="/dashboard">"ダッシュボード"</a>
                    <h1>"アカウント設定"</h1>
                    <span class="settings-header__plan">
                        {move || format!("{}プラン", auth.get().plan().unwrap_or_default().display_name())}
                    </span>
                </header>

                <form class="settings-profile" on:submit=on_save>
                    <h2>"プロフィール情報"</h2>
                    <label for="name">"お名前"</label>
                    <input id="name" class="login-input" type="text" placeholder="お名前を入力"
                        prop:value=move || input.get().name
                        on:input=move |ev| edit(RegistrationField::Name, |f, v| f.name = v, event_target_value(&ev))/>
                    <Show when=move || errors.get().name.is_some()>
                        <p class="register-field__error">{move || errors.get().name.unwrap_or_default()}</p>
                    </Show>

                    <label for="email">"メールアドレス"</label>
                    <input id="email" class="login-input" type="email" placeholder="メールアドレスを入力"
                        prop:value=move || input.get().email
                        on:input=move |ev| edit(RegistrationField::Email, |f, v| f.email = v, event_target_value(&ev))/>
                    <Show when=move || errors.get().email.is_some()>
                        <p class="register-field__error">{move || errors.get().email.unwrap_or_default()}</p>
                    </Show>

                    <label for="phone">"電話番号"</label>
                    <input id="phone" class="login-input" type="tel" placeholder="電話番号を入力"
                        prop:value=move || input.get().phone
                        on:input=move |ev| edit(RegistrationField::Phone, |f, v| f.phone = v, event_target_value(&ev))/>
                    <Show when=move || errors.get().phone.is_some()>
                        <p class="register-field__error">{move || errors.get().phone.unwrap_or_default()}</p>
                    </Show>

                    <button class="login-button" type="submit" disabled=move || save.get().is_busy()>
                        {move || if save.get().is_busy() { "保存中..." } else { "保存" }}
                    </button>
                </form>

                <section class="settings-danger">
                    <h2>"アカウント管理"</h2>
                    <h3>"アカウント削除"</h3>
                    <p>"アカウントを削除すると、すべてのデータが完全に削除され、復元することはできません。"</p>
                    <Show
                        when=move || confirming.get()
                        fallback=move || {
                            view! {
                                <button class="settings-danger__button" disabled=move || delete.get().is_busy()
                                    on:click=move |_| confirming.set(true)>
                                    {move || if delete.get().is_busy() { "削除中..." } else { "アカウントを削除" }}
                                </button>
                            }
                        }
                    >
                        <p class="settings-danger__confirm">{DELETE_CONFIRM}</p>
                        <button class="settings-danger__button" on:click=on_delete>"削除する"</button>
                        <button on:click=move |_| confirming.set(false)>"キャンセル"</button>
                    </Show>
                </section>

                <Show when=move || banner().is_some()>
                    <p class="settings-page__message" class:settings-page__message--ok=move || saved.get()>
                        {move || banner().unwrap_or_default()}
                    </p>
                </Show>
            </div>
        </Show>
    }
}
