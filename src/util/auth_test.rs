use super::*;
use crate::net::types::PlanTier;
use crate::services::token::decode_token;
use crate::util::storage::MemoryStorage;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        name: "テストユーザー".to_owned(),
        email: "test@example.com".to_owned(),
        phone: None,
        plan: PlanTier::Pro,
        trial_ends_at: None,
        created_at: 0,
    }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = AuthState::loaded(None);
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState::default();
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let mut state = AuthState::loaded(None);
    start_session(&mut state, &SessionStore::new(MemoryStorage::new()), user());
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn start_session_persists_and_publishes_the_same_session() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    let mut state = AuthState::default();

    let session = start_session(&mut state, &store, user());
    assert_eq!(state.session.as_ref(), Some(&session));
    assert_eq!(store.load(), Some(session.clone()));
    assert_eq!(decode_token(&session.token).map(|p| p.plan), Some(PlanTier::Pro));
}

#[test]
fn logout_after_start_session_redirects() {
    let store = SessionStore::new(MemoryStorage::new());
    let mut state = AuthState::default();
    start_session(&mut state, &store, user());
    logout(&mut state, &store);
    assert!(should_redirect_unauth(&state));
    assert!(store.load().is_none());
}
