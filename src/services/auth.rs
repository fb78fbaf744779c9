//! Simulated account service: login, registration, third-party sign-in, plan
//! changes, profile edits and account deletion.
//!
//! SYSTEM CONTEXT
//! ==============
//! There is no account backend yet. Accounts live in a [`UserRepository`]
//! (`localStorage` in the browser) and every call waits a configured latency
//! so the pages exercise their loading states the way they will against a
//! network.
//!
//! DESIGN
//! ======
//! `AuthService` is generic over its repository and identity provider so a
//! real backend can replace either seam without touching the pages. Emails are
//! matched verbatim. New accounts always start a seven-day trial. Operations
//! on the signed-in account take the session's `User` snapshot and re-adopt it
//! when the repository has lost the record, so a cleared account list does
//! not strand a still-valid session.
//!
//! TRADE-OFFS
//! ==========
//! Login checks the email shape and that a password was typed, nothing more.
//! With `auto_provision_on_login` an unknown email silently becomes a new free
//! account, which is only acceptable while the whole service is a mock.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::AuthConfig;
use crate::net::types::{DAY_MS, PlanTier, User};
use crate::services::users::UserRepository;
use crate::services::validation::{ProfileUpdate, RegistrationRequest, is_valid_email};
use crate::util::clock;

/// Length of the trial granted to every new account.
pub const TRIAL_MS: i64 = 7 * DAY_MS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("このメールアドレスは既に登録されています")]
    DuplicateEmail,
    #[error("user not found: {0}")]
    UnknownUser(String),
    #[error("identity provider failed: {0}")]
    Provider(String),
}

/// Identity asserted by a third-party sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// Short provider tag used to prefix new account ids.
    pub provider: &'static str,
    pub name: String,
    pub email: String,
}

/// Third-party sign-in seam.
pub trait IdentityProvider: Send + Sync + 'static {
    fn authenticate(&self) -> impl Future<Output = Result<ExternalIdentity, AuthError>> + Send;
}

/// Google sign-in stand-in that always answers with the same account.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockGoogleProvider;

impl IdentityProvider for MockGoogleProvider {
    fn authenticate(&self) -> impl Future<Output = Result<ExternalIdentity, AuthError>> + Send {
        future::ready(Ok(ExternalIdentity {
            provider: "google",
            name: "Google ユーザー".to_owned(),
            email: "google.user@example.com".to_owned(),
        }))
    }
}

/// Display name for an account created from a bare email.
#[must_use]
pub fn name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|local| !local.trim().is_empty())
        .unwrap_or(email)
        .to_owned()
}

fn new_trial_user(id: String, name: String, email: String, phone: Option<String>, plan: PlanTier, now_ms: i64) -> User {
    User {
        id,
        name,
        email,
        phone,
        plan,
        trial_ends_at: Some(now_ms.saturating_add(TRIAL_MS)),
        created_at: now_ms,
    }
}

pub struct AuthService<R, P = MockGoogleProvider> {
    users: Arc<R>,
    provider: P,
    config: AuthConfig,
}

impl<R, P: Clone> Clone for AuthService<R, P> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            provider: self.provider.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R: UserRepository> AuthService<R, MockGoogleProvider> {
    #[must_use]
    pub fn new(users: R, config: AuthConfig) -> Self {
        Self::with_provider(users, MockGoogleProvider, config)
    }
}

impl<R: UserRepository, P: IdentityProvider> AuthService<R, P> {
    #[must_use]
    pub fn with_provider(users: R, provider: P, config: AuthConfig) -> Self {
        Self {
            users: Arc::new(users),
            provider,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn users(&self) -> &R {
        &self.users
    }

    /// Email/password login.
    ///
    /// `None` when the email is malformed, the password is empty, or the email
    /// is unknown and auto-provisioning is off.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> Option<User> {
        clock::sleep(self.config.login_latency).await;

        if !is_valid_email(email) || password.is_empty() {
            tracing::info!("login rejected: malformed credentials");
            return None;
        }
        if let Some(user) = self.users.find_by_email(email).await {
            tracing::info!(user_id = %user.id, "login succeeded");
            return Some(user);
        }
        if !self.config.auto_provision_on_login {
            tracing::info!("login rejected: unknown email");
            return None;
        }

        let now = clock::now_ms();
        let user = new_trial_user(
            Uuid::new_v4().to_string(),
            name_from_email(email),
            email.to_owned(),
            None,
            PlanTier::Free,
            now,
        );
        match self.users.insert(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "provisioned account on first login");
                Some(user)
            }
            // Lost a race with a concurrent login for the same email.
            Err(AuthError::DuplicateEmail) => self.users.find_by_email(email).await,
            Err(err) => {
                tracing::warn!(error = %err, "login provisioning failed");
                None
            }
        }
    }

    /// Create an account from validated registration input.
    ///
    /// # Errors
    ///
    /// [`AuthError::DuplicateEmail`] when the email is already registered.
    pub async fn register_user(&self, request: RegistrationRequest) -> Result<User, AuthError> {
        clock::sleep(self.config.register_latency).await;

        if self.users.find_by_email(&request.email).await.is_some() {
            tracing::info!("registration rejected: email already registered");
            return Err(AuthError::DuplicateEmail);
        }
        let user = new_trial_user(
            Uuid::new_v4().to_string(),
            request.name,
            request.email,
            Some(request.phone),
            request.plan,
            clock::now_ms(),
        );
        let user = self.users.insert(user).await?;
        tracing::info!(user_id = %user.id, plan = %user.plan, marketing = request.marketing_opt_in, "registered account");
        Ok(user)
    }

    /// Sign in through the identity provider, creating a free trial account on first use.
    ///
    /// # Errors
    ///
    /// [`AuthError::Provider`] when the provider rejects the sign-in.
    pub async fn authenticate_with_google(&self) -> Result<User, AuthError> {
        clock::sleep(self.config.google_latency).await;

        let identity = self.provider.authenticate().await?;
        if let Some(user) = self.users.find_by_email(&identity.email).await {
            tracing::info!(user_id = %user.id, provider = identity.provider, "external sign-in succeeded");
            return Ok(user);
        }
        let user = new_trial_user(
            format!("{}_{}", identity.provider, Uuid::new_v4()),
            identity.name,
            identity.email.clone(),
            None,
            PlanTier::Free,
            clock::now_ms(),
        );
        let user = match self.users.insert(user).await {
            Ok(user) => user,
            Err(AuthError::DuplicateEmail) => self
                .users
                .find_by_email(&identity.email)
                .await
                .ok_or_else(|| AuthError::UnknownUser(identity.email.clone()))?,
            Err(err) => return Err(err),
        };
        tracing::info!(user_id = %user.id, provider = identity.provider, "provisioned account from external sign-in");
        Ok(user)
    }

    /// Move the signed-in `user` to `plan`.
    ///
    /// # Errors
    ///
    /// [`AuthError::DuplicateEmail`] when the account is missing and its email
    /// now belongs to another account.
    pub async fn change_plan(&self, user: &User, plan: PlanTier) -> Result<User, AuthError> {
        clock::sleep(self.config.plan_change_latency).await;

        self.adopt(user).await?;
        let user = self.users.update_plan(&user.id, plan).await?;
        tracing::info!(user_id = %user.id, plan = %plan, "plan changed");
        Ok(user)
    }

    /// Save profile edits for the signed-in `user`.
    ///
    /// # Errors
    ///
    /// [`AuthError::DuplicateEmail`] when the new email belongs to another account.
    pub async fn update_profile(&self, user: &User, update: ProfileUpdate) -> Result<User, AuthError> {
        clock::sleep(self.config.profile_save_latency).await;

        self.adopt(user).await?;
        let user = self.users.update_profile(&user.id, update).await?;
        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Remove the account. Deleting an account that is already gone succeeds.
    ///
    /// The caller still owns the session and must clear it.
    ///
    /// # Errors
    ///
    /// Whatever the repository reports other than a missing account.
    pub async fn delete_account(&self, user_id: &str) -> Result<(), AuthError> {
        clock::sleep(self.config.delete_latency).await;

        match self.users.delete(user_id).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "account deleted");
                Ok(())
            }
            Err(AuthError::UnknownUser(_)) => {
                tracing::info!(%user_id, "account already absent");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Put the session's snapshot back when the repository no longer has it.
    async fn adopt(&self, user: &User) -> Result<(), AuthError> {
        if self.users.find_by_id(&user.id).await.is_some() {
            return Ok(());
        }
        self.users.insert(user.clone()).await?;
        tracing::info!(user_id = %user.id, "restored account from session");
        Ok(())
    }
}
