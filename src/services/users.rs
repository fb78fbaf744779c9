//! Account repository.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every sign-in ends in a full page load, which rebuilds the app and its
//! services. Accounts created before that load must still be there after it,
//! so `LocalUserRepository` writes the whole account list to a [`Storage`]
//! record on every change and reads it back on construction.
//!
//! ERROR HANDLING
//! ==============
//! An unreadable record is logged and replaced by the seed list on the next
//! write. Storage failures never reach callers.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use std::future;
use std::sync::{Mutex, PoisonError};

use crate::net::types::{PlanTier, User};
use crate::services::auth::AuthError;
use crate::services::validation::ProfileUpdate;
use crate::util::clock;
use crate::util::storage::{BrowserStorage, Storage};

/// `localStorage` key of the persisted account list.
pub const USERS_STORAGE_KEY: &str = "sellernavi-users";

/// Account storage seam.
pub trait UserRepository: Send + Sync + 'static {
    fn find_by_email(&self, email: &str) -> impl Future<Output = Option<User>> + Send;

    fn find_by_id(&self, user_id: &str) -> impl Future<Output = Option<User>> + Send;

    /// Add `user`, failing with [`AuthError::DuplicateEmail`] if the email is taken.
    fn insert(&self, user: User) -> impl Future<Output = Result<User, AuthError>> + Send;

    fn update_plan(&self, user_id: &str, plan: PlanTier) -> impl Future<Output = Result<User, AuthError>> + Send;

    /// Replace name, email and phone. The new email must not belong to another account.
    fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    /// Remove the account and return its last state.
    fn delete(&self, user_id: &str) -> impl Future<Output = Result<User, AuthError>> + Send;
}

/// Demo account `test@example.com` on the pro plan.
#[must_use]
pub fn demo_user() -> User {
    User {
        id: "1".to_owned(),
        name: "テストユーザー".to_owned(),
        email: "test@example.com".to_owned(),
        phone: None,
        plan: PlanTier::Pro,
        trial_ends_at: None,
        created_at: clock::now_ms(),
    }
}

/// Account list cached in memory and written through to a [`Storage`] record.
#[derive(Debug)]
pub struct LocalUserRepository<S = BrowserStorage> {
    storage: S,
    users: Mutex<Vec<User>>,
}

impl LocalUserRepository<BrowserStorage> {
    /// Seeded repository over `window.localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::seeded(BrowserStorage)
    }
}

impl<S: Storage> LocalUserRepository<S> {
    /// Repository holding whatever `storage` already contains.
    #[must_use]
    pub fn new(storage: S) -> Self {
        let users = match storage.get_item(USERS_STORAGE_KEY) {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<User>>(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "dropping unreadable account list");
                Vec::new()
            }),
        };
        Self {
            storage,
            users: Mutex::new(users),
        }
    }

    /// Like [`LocalUserRepository::new`], adding the demo account when missing.
    #[must_use]
    pub fn seeded(storage: S) -> Self {
        let repo = Self::new(storage);
        {
            let mut users = repo.lock();
            let demo = demo_user();
            if !users.iter().any(|u| u.email == demo.email) {
                users.push(demo);
                repo.persist(&users);
            }
        }
        repo
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, users: &[User]) {
        match serde_json::to_string(users) {
            Ok(raw) => self.storage.set_item(USERS_STORAGE_KEY, &raw),
            Err(err) => tracing::warn!(error = %err, "account list not serializable; nothing saved"),
        }
    }

    /// Apply `edit` to the account with `user_id` and persist the list.
    fn modify<F>(&self, user_id: &str, edit: F) -> Result<User, AuthError>
    where
        F: FnOnce(&mut Vec<User>, usize) -> Result<User, AuthError>,
    {
        let mut users = self.lock();
        let Some(index) = users.iter().position(|u| u.id == user_id) else {
            return Err(AuthError::UnknownUser(user_id.to_owned()));
        };
        let result = edit(&mut users, index)?;
        self.persist(&users);
        Ok(result)
    }
}

impl<S: Storage + Send + Sync + 'static> UserRepository for LocalUserRepository<S> {
    fn find_by_email(&self, email: &str) -> impl Future<Output = Option<User>> + Send {
        future::ready(self.lock().iter().find(|u| u.email == email).cloned())
    }

    fn find_by_id(&self, user_id: &str) -> impl Future<Output = Option<User>> + Send {
        future::ready(self.lock().iter().find(|u| u.id == user_id).cloned())
    }

    fn insert(&self, user: User) -> impl Future<Output = Result<User, AuthError>> + Send {
        let mut users = self.lock();
        let result = if users.iter().any(|u| u.email == user.email) {
            Err(AuthError::DuplicateEmail)
        } else {
            users.push(user.clone());
            self.persist(&users);
            Ok(user)
        };
        future::ready(result)
    }

    fn update_plan(&self, user_id: &str, plan: PlanTier) -> impl Future<Output = Result<User, AuthError>> + Send {
        future::ready(self.modify(user_id, |users, i| {
            users[i].plan = plan;
            Ok(users[i].clone())
        }))
    }

    fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> impl Future<Output = Result<User, AuthError>> + Send {
        future::ready(self.modify(user_id, |users, i| {
            if users.iter().any(|u| u.email == update.email && u.id != user_id) {
                return Err(AuthError::DuplicateEmail);
            }
            let user = &mut users[i];
            user.name = update.name;
            user.email = update.email;
            user.phone = update.phone;
            Ok(user.clone())
        }))
    }

    fn delete(&self, user_id: &str) -> impl Future<Output = Result<User, AuthError>> + Send {
        future::ready(self.modify(user_id, |users, i| Ok(users.remove(i))))
    }
}
