//! Client configuration.
//!
//! Defaults reproduce the production mock timings. `from_env` lets native
//! callers (tests, tooling) override them through `SELLERNAVI_*` variables; in
//! the browser the environment is empty and the defaults apply.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

const DEFAULT_LOGIN_LATENCY_MS: u64 = 1000;
const DEFAULT_REGISTER_LATENCY_MS: u64 = 1500;
const DEFAULT_GOOGLE_LATENCY_MS: u64 = 1500;
const DEFAULT_PLAN_CHANGE_LATENCY_MS: u64 = 2000;
const DEFAULT_REGISTRATION_REDIRECT_MS: u64 = 2000;
const DEFAULT_PROFILE_SAVE_LATENCY_MS: u64 = 2000;
const DEFAULT_DELETE_LATENCY_MS: u64 = 3000;

const DEFAULT_NORMAL_SEARCH_MS: u64 = 3000;
const DEFAULT_REALTIME_SEARCH_MS: u64 = 5000;
const DEFAULT_REFRESH_MS: u64 = 2000;
const DEFAULT_LOAD_MORE_MS: u64 = 1000;

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn env_millis(key: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_parse(key, default_ms))
}

/// Settings for login, registration and session routing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub login_latency: Duration,
    pub register_latency: Duration,
    pub google_latency: Duration,
    pub plan_change_latency: Duration,
    pub profile_save_latency: Duration,
    pub delete_latency: Duration,
    /// Create a free trial account when an unknown email logs in.
    ///
    /// Mock-mode convenience: it conflates login with sign-up and must be off
    /// once a real identity backend sits behind `UserRepository`.
    pub auto_provision_on_login: bool,
    /// Unauthenticated landing route, used after logout and by route guards.
    pub landing_path: String,
    /// Route entered after a successful sign-in.
    pub home_path: String,
    /// Pause on the registration success screen before entering `home_path`.
    pub registration_redirect_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_latency: Duration::from_millis(DEFAULT_LOGIN_LATENCY_MS),
            register_latency: Duration::from_millis(DEFAULT_REGISTER_LATENCY_MS),
            google_latency: Duration::from_millis(DEFAULT_GOOGLE_LATENCY_MS),
            plan_change_latency: Duration::from_millis(DEFAULT_PLAN_CHANGE_LATENCY_MS),
            profile_save_latency: Duration::from_millis(DEFAULT_PROFILE_SAVE_LATENCY_MS),
            delete_latency: Duration::from_millis(DEFAULT_DELETE_LATENCY_MS),
            auto_provision_on_login: true,
            landing_path: "/".to_owned(),
            home_path: "/dashboard".to_owned(),
            registration_redirect_delay: Duration::from_millis(DEFAULT_REGISTRATION_REDIRECT_MS),
        }
    }
}

impl AuthConfig {
    /// Load overrides from `SELLERNAVI_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            login_latency: env_millis("SELLERNAVI_LOGIN_LATENCY_MS", DEFAULT_LOGIN_LATENCY_MS),
            register_latency: env_millis("SELLERNAVI_REGISTER_LATENCY_MS", DEFAULT_REGISTER_LATENCY_MS),
            google_latency: env_millis("SELLERNAVI_GOOGLE_LATENCY_MS", DEFAULT_GOOGLE_LATENCY_MS),
            plan_change_latency: env_millis("SELLERNAVI_PLAN_CHANGE_LATENCY_MS", DEFAULT_PLAN_CHANGE_LATENCY_MS),
            profile_save_latency: env_millis("SELLERNAVI_PROFILE_SAVE_LATENCY_MS", DEFAULT_PROFILE_SAVE_LATENCY_MS),
            delete_latency: env_millis("SELLERNAVI_DELETE_LATENCY_MS", DEFAULT_DELETE_LATENCY_MS),
            auto_provision_on_login: env_parse("SELLERNAVI_AUTO_PROVISION", defaults.auto_provision_on_login),
            landing_path: env_string("SELLERNAVI_LANDING_PATH", &defaults.landing_path),
            home_path: env_string("SELLERNAVI_HOME_PATH", &defaults.home_path),
            registration_redirect_delay: env_millis(
                "SELLERNAVI_REGISTRATION_REDIRECT_MS",
                DEFAULT_REGISTRATION_REDIRECT_MS,
            ),
        }
    }

    /// Defaults with every simulated delay removed.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            login_latency: Duration::ZERO,
            register_latency: Duration::ZERO,
            google_latency: Duration::ZERO,
            plan_change_latency: Duration::ZERO,
            profile_save_latency: Duration::ZERO,
            delete_latency: Duration::ZERO,
            registration_redirect_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Simulated dashboard search timings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub normal_latency: Duration,
    pub realtime_latency: Duration,
    pub refresh_latency: Duration,
    /// Competitor list "show more" delay.
    pub load_more_latency: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            normal_latency: Duration::from_millis(DEFAULT_NORMAL_SEARCH_MS),
            realtime_latency: Duration::from_millis(DEFAULT_REALTIME_SEARCH_MS),
            refresh_latency: Duration::from_millis(DEFAULT_REFRESH_MS),
            load_more_latency: Duration::from_millis(DEFAULT_LOAD_MORE_MS),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            normal_latency: env_millis("SELLERNAVI_NORMAL_SEARCH_MS", DEFAULT_NORMAL_SEARCH_MS),
            realtime_latency: env_millis("SELLERNAVI_REALTIME_SEARCH_MS", DEFAULT_REALTIME_SEARCH_MS),
            refresh_latency: env_millis("SELLERNAVI_REFRESH_MS", DEFAULT_REFRESH_MS),
            load_more_latency: env_millis("SELLERNAVI_LOAD_MORE_MS", DEFAULT_LOAD_MORE_MS),
        }
    }
}
