use super::*;
use crate::services::session::issue_session_at;
use crate::util::storage::MemoryStorage;

const NOW: i64 = 1_700_000_000_000;

fn user(plan: PlanTier) -> User {
    User {
        id: "u1".to_owned(),
        name: "山田太郎".to_owned(),
        email: "yamada@example.com".to_owned(),
        phone: None,
        plan,
        trial_ends_at: None,
        created_at: NOW,
    }
}

fn store() -> SessionStore<MemoryStorage> {
    SessionStore::new(MemoryStorage::new())
}

#[test]
fn default_state_is_loading_and_unknown() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert_eq!(state.gate(), AuthGate::Unknown);
}

#[test]
fn initialize_without_record_is_anonymous() {
    let mut state = AuthState::default();
    state.initialize_at(&store(), NOW);
    assert!(!state.loading);
    assert_eq!(state.gate(), AuthGate::Anonymous);
}

#[test]
fn initialize_restores_a_valid_session() {
    let store = store();
    let session = issue_session_at(user(PlanTier::Standard), NOW);
    store.save(&session);

    let mut state = AuthState::default();
    state.initialize_at(&store, NOW + 1000);
    assert_eq!(state.gate(), AuthGate::Authenticated);
    assert_eq!(state.session, Some(session));
    assert_eq!(state.plan(), Some(PlanTier::Standard));
}

#[test]
fn initialize_treats_expired_session_as_anonymous() {
    let store = store();
    let session = issue_session_at(user(PlanTier::Pro), NOW);
    store.save(&session);

    let mut state = AuthState::default();
    state.initialize_at(&store, session.expires_at + 1);
    assert_eq!(state.gate(), AuthGate::Anonymous);
    assert!(store.load_at(NOW).is_none());
}

#[test]
fn sign_in_keeps_user_and_session_in_step() {
    let mut state = AuthState::loaded(None);
    let session = issue_session_at(user(PlanTier::Free), NOW);
    state.sign_in(session.clone());
    assert_eq!(state.user.as_ref(), Some(&session.user));
    assert_eq!(state.session, Some(session));
    assert!(!state.loading);
}

#[test]
fn logout_clears_store_and_state() {
    let store = store();
    let session = issue_session_at(user(PlanTier::Pro), NOW);
    store.save(&session);
    let mut state = AuthState::loaded(Some(session));

    logout(&mut state, &store);
    assert_eq!(state.gate(), AuthGate::Anonymous);
    assert!(state.session.is_none());
    assert!(store.load_at(NOW).is_none());

    logout(&mut state, &store);
    assert_eq!(state.gate(), AuthGate::Anonymous);
}
