//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The session store owns the persisted
//! record; this struct is a cached copy refreshed on startup and after every
//! sign-in or logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{AuthSession, PlanTier, User};
use crate::services::session::SessionStore;
use crate::util::clock;
use crate::util::storage::Storage;

/// Authentication state tracking the current user and loading status.
///
/// `loading` is true only until the stored session has been read once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub session: Option<AuthSession>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            session: None,
            loading: true,
        }
    }
}

/// What a protected page may conclude about the visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthGate {
    /// Session not read yet; render a spinner, do not redirect.
    Unknown,
    Anonymous,
    Authenticated,
}

impl AuthState {
    /// State after the initial load produced `session`.
    #[must_use]
    pub fn loaded(session: Option<AuthSession>) -> Self {
        Self {
            user: session.as_ref().map(|s| s.user.clone()),
            session,
            loading: false,
        }
    }

    /// Read the persisted session once and leave the loading state.
    pub fn initialize<S: Storage>(&mut self, store: &SessionStore<S>) {
        self.initialize_at(store, clock::now_ms());
    }

    pub fn initialize_at<S: Storage>(&mut self, store: &SessionStore<S>, now_ms: i64) {
        *self = Self::loaded(store.load_at(now_ms));
        match &self.user {
            Some(user) => tracing::info!(user_id = %user.id, "restored session"),
            None => tracing::debug!("no stored session"),
        }
    }

    /// Adopt a freshly issued session.
    pub fn sign_in(&mut self, session: AuthSession) {
        *self = Self::loaded(Some(session));
    }

    pub fn sign_out(&mut self) {
        *self = Self::loaded(None);
    }

    #[must_use]
    pub fn gate(&self) -> AuthGate {
        if self.loading {
            AuthGate::Unknown
        } else if self.user.is_some() {
            AuthGate::Authenticated
        } else {
            AuthGate::Anonymous
        }
    }

    #[must_use]
    pub fn plan(&self) -> Option<PlanTier> {
        self.user.as_ref().map(|u| u.plan)
    }
}

/// Erase the persisted session and reset `state` to anonymous.
pub fn logout<S: Storage>(state: &mut AuthState, store: &SessionStore<S>) {
    if let Some(user) = &state.user {
        tracing::info!(user_id = %user.id, "logged out");
    }
    store.clear();
    state.sign_out();
}
