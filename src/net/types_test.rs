use super::*;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        name: "山田太郎".to_owned(),
        email: "yamada@example.com".to_owned(),
        phone: Some("090-1234-5678".to_owned()),
        plan: PlanTier::Standard,
        trial_ends_at: Some(1_000 + 7 * DAY_MS),
        created_at: 1_000,
    }
}

#[test]
fn plan_tier_parses_lowercase_ids() {
    for plan in PlanTier::ALL {
        assert_eq!(plan.as_str().parse::<PlanTier>(), Ok(plan));
    }
    assert!("Pro".parse::<PlanTier>().is_err());
    assert!("enterprise".parse::<PlanTier>().is_err());
}

#[test]
fn plan_tier_serializes_as_lowercase_string() {
    assert_eq!(serde_json::to_string(&PlanTier::Standard).unwrap(), "\"standard\"");
    let parsed: PlanTier = serde_json::from_str("\"pro\"").unwrap();
    assert_eq!(parsed, PlanTier::Pro);
}

#[test]
fn user_uses_camel_case_field_names() {
    let json = serde_json::to_value(user()).unwrap();
    assert!(json.get("trialEndsAt").is_some());
    assert!(json.get("createdAt").is_some());
    assert!(json.get("trial_ends_at").is_none());
}

#[test]
fn user_without_optional_fields_omits_them() {
    let mut u = user();
    u.phone = None;
    u.trial_ends_at = None;
    let json = serde_json::to_value(&u).unwrap();
    assert!(json.get("phone").is_none());
    assert!(json.get("trialEndsAt").is_none());

    let parsed: User = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, u);
}

#[test]
fn session_valid_strictly_before_expiry() {
    let session = AuthSession { user: user(), token: "t".to_owned(), expires_at: 5_000 };
    assert!(session.is_valid_at(4_999));
    assert!(!session.is_valid_at(5_000));
    assert!(!session.is_valid_at(6_000));
}

#[test]
fn trial_state_follows_trial_end() {
    let u = user();
    assert!(u.on_trial_at(1_000));
    assert!(!u.on_trial_at(1_000 + 7 * DAY_MS));

    let mut no_trial = u;
    no_trial.trial_ends_at = None;
    assert!(!no_trial.on_trial_at(0));
}
