use super::*;

const NOW: i64 = 1_700_000_000_000;

fn user() -> User {
    User {
        id: "42".to_owned(),
        name: "テストユーザー".to_owned(),
        email: "test@example.com".to_owned(),
        phone: None,
        plan: PlanTier::Pro,
        trial_ends_at: None,
        created_at: NOW,
    }
}

#[test]
fn decode_returns_the_encoded_claims_before_expiry() {
    let token = encode_token_at(&user(), NOW);
    let payload = decode_token_at(&token, NOW + 1).unwrap();
    assert_eq!(payload.user_id, "42");
    assert_eq!(payload.email, "test@example.com");
    assert_eq!(payload.plan, PlanTier::Pro);
    assert_eq!(payload.exp, NOW + TOKEN_TTL_MS);
}

#[test]
fn token_expires_seven_days_after_issue() {
    let token = encode_token_at(&user(), NOW);
    assert!(decode_token_at(&token, NOW + TOKEN_TTL_MS).is_some());
    assert!(decode_token_at(&token, NOW + TOKEN_TTL_MS + 1).is_none());
    assert_eq!(TOKEN_TTL_MS, 7 * 24 * 60 * 60 * 1000);
}

#[test]
fn token_uses_camel_case_json_payload() {
    let token = encode_token_at(&user(), NOW);
    let json: serde_json::Value = serde_json::from_slice(&STANDARD.decode(token).unwrap()).unwrap();
    assert_eq!(json["userId"], "42");
    assert_eq!(json["plan"], "pro");
    assert_eq!(json["exp"], NOW + TOKEN_TTL_MS);
}

#[test]
fn malformed_tokens_decode_to_none() {
    assert!(decode_token_at("", NOW).is_none());
    assert!(decode_token_at("not base64 at all!", NOW).is_none());
    assert!(decode_token_at(&STANDARD.encode("{not json"), NOW).is_none());
    assert!(decode_token_at(&STANDARD.encode(r#"{"userId":"1"}"#), NOW).is_none());
}

#[test]
fn unknown_plan_in_payload_is_rejected() {
    let raw = r#"{"userId":"1","email":"a@b.co","plan":"enterprise","exp":9999999999999}"#;
    assert!(decode_token_at(&STANDARD.encode(raw), NOW).is_none());
}

#[test]
fn non_ascii_claims_survive_encoding() {
    let mut u = user();
    u.email = "ユーザー@例え.jp".to_owned();
    let payload = decode_token_at(&encode_token_at(&u, NOW), NOW).unwrap();
    assert_eq!(payload.email, "ユーザー@例え.jp");
}

#[test]
fn encode_token_uses_the_wall_clock() {
    let token = encode_token(&user());
    assert!(decode_token(&token).is_some());
}
