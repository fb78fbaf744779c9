//! Client-side session persistence.
//!
//! ARCHITECTURE
//! ============
//! The store owns exactly one record under [`SESSION_STORAGE_KEY`]. Writes
//! replace the whole record; there are no partial updates. Expiry is enforced
//! on read: an expired or unreadable record is erased the first time it is
//! seen, so the rest of the client only ever observes valid sessions.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here fails. A missing storage medium makes every call a no-op, and
//! corrupt records are logged and dropped.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{AuthSession, User};
use crate::services::token::{self, TOKEN_TTL_MS};
use crate::util::clock;
use crate::util::storage::{BrowserStorage, Storage};

/// `localStorage` key of the persisted session.
pub const SESSION_STORAGE_KEY: &str = "auth-session";

/// Wrap `user` in a session whose token and record expire together.
#[must_use]
pub fn issue_session(user: User) -> AuthSession {
    issue_session_at(user, clock::now_ms())
}

#[must_use]
pub fn issue_session_at(user: User, now_ms: i64) -> AuthSession {
    let token = token::encode_token_at(&user, now_ms);
    AuthSession {
        user,
        token,
        expires_at: now_ms.saturating_add(TOKEN_TTL_MS),
    }
}

/// Persisted session record over a [`Storage`] medium.
#[derive(Clone, Debug)]
pub struct SessionStore<S = BrowserStorage> {
    storage: S,
    key: String,
}

impl SessionStore<BrowserStorage> {
    /// Store backed by `window.localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }
}

impl<S: Storage> SessionStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: SESSION_STORAGE_KEY.to_owned(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[cfg(test)]
    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Persist `session`, replacing any previous record.
    pub fn save(&self, session: &AuthSession) {
        match serde_json::to_string(session) {
            Ok(raw) => {
                self.storage.set_item(&self.key, &raw);
                tracing::debug!(user_id = %session.user.id, expires_at = session.expires_at, "session saved");
            }
            Err(err) => tracing::warn!(error = %err, "session not serializable; nothing saved"),
        }
    }

    /// The stored session, if one exists and has not expired.
    #[must_use]
    pub fn load(&self) -> Option<AuthSession> {
        self.load_at(clock::now_ms())
    }

    #[must_use]
    pub fn load_at(&self, now_ms: i64) -> Option<AuthSession> {
        let raw = self.storage.get_item(&self.key)?;
        let session = match serde_json::from_str::<AuthSession>(&raw) {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!(error = %err, key = %self.key, "dropping unreadable session record");
                self.clear();
                return None;
            }
        };
        if !session.is_valid_at(now_ms) {
            tracing::info!(user_id = %session.user.id, "stored session expired; clearing");
            self.clear();
            return None;
        }
        Some(session)
    }

    /// Erase the stored session. Safe to call when none exists.
    pub fn clear(&self) {
        self.storage.remove_item(&self.key);
    }
}
