//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior,
//! and every sign-in path (password, registration, Google) must persist and
//! publish its session the same way.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::{AuthSession, User};
use crate::services::session::{SessionStore, issue_session};
use crate::state::auth::{AuthGate, AuthState, logout};
use crate::util::storage::Storage;

/// True once auth has loaded and no user is present.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    state.gate() == AuthGate::Anonymous
}

/// Redirect to `landing` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F, landing: String)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(
                &landing,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });
}

/// Wrap `user` in a new session, persist it and adopt it in `state`.
pub fn start_session<S: Storage>(state: &mut AuthState, store: &SessionStore<S>, user: User) -> AuthSession {
    let session = issue_session(user);
    store.save(&session);
    state.sign_in(session.clone());
    tracing::info!(user_id = %session.user.id, "session started");
    session
}

/// [`start_session`] against browser storage and the shared auth signal.
pub fn enter_session(auth: RwSignal<AuthState>, user: User) {
    let store = SessionStore::browser();
    auth.update(|state| {
        start_session(state, &store, user);
    });
}

/// Log out and leave with a full page load so no in-memory state survives.
pub fn logout_and_leave(auth: RwSignal<AuthState>, landing: &str) {
    let store = SessionStore::browser();
    auth.update(|state| logout(state, &store));
    hard_navigate(landing);
}

/// Full document navigation, bypassing the client router.
pub fn hard_navigate(path: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_href(path) {
                tracing::warn!(?err, %path, "navigation failed");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    tracing::debug!(%path, "navigation skipped outside the browser");
}
