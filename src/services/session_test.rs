use super::*;
use crate::net::types::{DAY_MS, PlanTier};
use crate::services::token::decode_token_at;
use crate::util::storage::MemoryStorage;

const NOW: i64 = 1_700_000_000_000;

fn user() -> User {
    User {
        id: "7".to_owned(),
        name: "山田太郎".to_owned(),
        email: "yamada@example.com".to_owned(),
        phone: Some("090-1234-5678".to_owned()),
        plan: PlanTier::Standard,
        trial_ends_at: Some(NOW + 7 * DAY_MS),
        created_at: NOW,
    }
}

fn store() -> (SessionStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    (SessionStore::new(storage.clone()), storage)
}

#[test]
fn issued_session_and_token_share_expiry() {
    let session = issue_session_at(user(), NOW);
    assert_eq!(session.expires_at, NOW + 7 * DAY_MS);
    let payload = decode_token_at(&session.token, NOW).unwrap();
    assert_eq!(payload.exp, session.expires_at);
    assert_eq!(payload.user_id, session.user.id);
}

#[test]
fn save_then_load_returns_the_session() {
    let (store, storage) = store();
    let session = issue_session_at(user(), NOW);
    store.save(&session);
    assert!(storage.contains(SESSION_STORAGE_KEY));
    assert_eq!(store.load_at(NOW + 1), Some(session));
}

#[test]
fn save_overwrites_previous_record() {
    let (store, storage) = store();
    store.save(&issue_session_at(user(), NOW));
    let mut other = user();
    other.id = "8".to_owned();
    let second = issue_session_at(other, NOW);
    store.save(&second);
    assert_eq!(storage.len(), 1);
    assert_eq!(store.load_at(NOW).map(|s| s.user.id), Some("8".to_owned()));
}

#[test]
fn expired_session_is_never_returned_and_is_erased() {
    let (store, storage) = store();
    let session = issue_session_at(user(), NOW);
    store.save(&session);

    assert!(store.load_at(session.expires_at).is_none());
    assert!(!storage.contains(SESSION_STORAGE_KEY));
    assert!(store.load_at(NOW).is_none());
}

#[test]
fn clear_twice_leaves_no_session() {
    let (store, storage) = store();
    store.save(&issue_session_at(user(), NOW));
    store.clear();
    store.clear();
    assert!(storage.is_empty());
    assert!(store.load_at(NOW).is_none());
}

#[test]
fn corrupt_record_is_treated_as_absent_and_erased() {
    let (store, storage) = store();
    storage.set_item(SESSION_STORAGE_KEY, "{\"user\":");
    assert!(store.load_at(NOW).is_none());
    assert!(storage.is_empty());
}

#[test]
fn persisted_record_is_camel_case_json() {
    let (store, storage) = store();
    store.save(&issue_session_at(user(), NOW));
    let raw = storage.get_item(SESSION_STORAGE_KEY).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["expiresAt"], NOW + 7 * DAY_MS);
    assert_eq!(json["user"]["email"], "yamada@example.com");
    assert!(json["token"].is_string());
}

#[test]
fn custom_key_isolates_records() {
    let storage = MemoryStorage::new();
    let a = SessionStore::new(storage.clone());
    let b = SessionStore::new(storage.clone()).with_key("other-session");
    a.save(&issue_session_at(user(), NOW));
    assert!(b.load_at(NOW).is_none());
    assert_eq!(b.key(), "other-session");
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_store_is_a_noop_off_the_browser() {
    let store = SessionStore::browser();
    store.save(&issue_session_at(user(), NOW));
    assert!(store.load().is_none());
    store.clear();
}
