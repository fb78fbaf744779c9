use super::*;

#[test]
fn defaults_match_mock_timings() {
    let auth = AuthConfig::default();
    assert_eq!(auth.login_latency, Duration::from_millis(1000));
    assert_eq!(auth.register_latency, Duration::from_millis(1500));
    assert_eq!(auth.google_latency, Duration::from_millis(1500));
    assert!(auth.auto_provision_on_login);
    assert_eq!(auth.landing_path, "/");
    assert_eq!(auth.home_path, "/dashboard");
    assert_eq!(auth.profile_save_latency, Duration::from_millis(2000));
    assert_eq!(auth.delete_latency, Duration::from_millis(3000));

    let search = SearchConfig::default();
    assert_eq!(search.normal_latency, Duration::from_millis(3000));
    assert_eq!(search.realtime_latency, Duration::from_millis(5000));
    assert_eq!(search.load_more_latency, Duration::from_millis(1000));
}

#[test]
fn instant_removes_delays_but_keeps_routes() {
    let auth = AuthConfig::instant();
    assert!(auth.login_latency.is_zero());
    assert!(auth.register_latency.is_zero());
    assert!(auth.registration_redirect_delay.is_zero());
    assert!(auth.delete_latency.is_zero());
    assert_eq!(auth.home_path, AuthConfig::default().home_path);
}

#[test]
fn env_parse_falls_back_on_missing_or_invalid_values() {
    assert_eq!(env_parse("SELLERNAVI_TEST_UNSET_VARIABLE", 7_u64), 7);
    assert!(env_parse("SELLERNAVI_TEST_UNSET_VARIABLE", true));
    assert_eq!(env_string("SELLERNAVI_TEST_UNSET_VARIABLE", "/x"), "/x");
}
