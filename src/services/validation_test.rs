use super::*;

fn valid_form() -> RegistrationForm {
    RegistrationForm {
        name: "山田太郎".to_owned(),
        email: "yamada@example.com".to_owned(),
        phone: "090-1234-5678".to_owned(),
        password: "Passw0rd1".to_owned(),
        confirm_password: "Passw0rd1".to_owned(),
        plan: PlanTier::Standard,
        agree_to_terms: true,
        agree_to_privacy: true,
        agree_to_marketing: false,
    }
}

#[test]
fn email_accepts_standard_addresses() {
    assert!(is_valid_email("user@example.com"));
    assert!(is_valid_email("a.b+tag@mail.example.co.jp"));
    assert!(is_valid_email("x@y.z"));
}

#[test]
fn email_rejects_malformed_addresses() {
    for bad in ["", "user", "@example.com", "user@", "user@example", "a@b@c.com", "us er@example.com", "user@.com", "user@example."] {
        assert!(!is_valid_email(bad), "{bad:?} should be rejected");
    }
}

#[test]
fn phone_accepts_domestic_and_international_forms() {
    assert!(is_valid_phone("090-1234-5678"));
    assert!(is_valid_phone("09012345678"));
    assert!(is_valid_phone("+8109012345678"));
    assert!(is_valid_phone("+819012345678"));
    assert!(is_valid_phone("+81-90-1234-5678"));
}

#[test]
fn phone_rejects_other_shapes() {
    for bad in ["", "0312345678", "12345678901", "090-1234-567", "0901234567890", "+8190123", "090-abcd-5678", "+1 555 123 4567"] {
        assert!(!is_valid_phone(bad), "{bad:?} should be rejected");
    }
}

#[test]
fn password_strength_requires_mixed_case_and_digit() {
    assert!(is_strong_password("Passw0rd1"));
    assert!(!is_strong_password("Pass0rd"));
    assert!(!is_strong_password("password1"));
    assert!(!is_strong_password("PASSWORD1"));
    assert!(!is_strong_password("Password"));
}

#[test]
fn valid_form_produces_request() {
    let request = valid_form().validate().unwrap();
    assert_eq!(request.name, "山田太郎");
    assert_eq!(request.plan, PlanTier::Standard);
    assert_eq!(request.phone, "090-1234-5678");
    assert!(!request.marketing_opt_in);
}

#[test]
fn empty_form_reports_every_field() {
    let errors = RegistrationForm::default().validate().unwrap_err();
    for field in [
        RegistrationField::Name,
        RegistrationField::Email,
        RegistrationField::Phone,
        RegistrationField::Password,
        RegistrationField::ConfirmPassword,
        RegistrationField::Terms,
    ] {
        assert!(errors.get(field).is_some(), "{field:?} should have an error");
    }
    assert!(errors.general.is_none());
}

#[test]
fn short_name_is_rejected() {
    let mut form = valid_form();
    form.name = "山".to_owned();
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.name.as_deref(), Some("お名前は2文字以上で入力してください"));
}

#[test]
fn whitespace_name_counts_as_missing() {
    let mut form = valid_form();
    form.name = "   ".to_owned();
    assert_eq!(form.validate().unwrap_err().name.as_deref(), Some("お名前を入力してください"));
}

#[test]
fn password_messages_distinguish_length_and_composition() {
    let mut form = valid_form();
    form.password = "Pw1".to_owned();
    form.confirm_password = "Pw1".to_owned();
    assert_eq!(
        form.validate().unwrap_err().password.as_deref(),
        Some("パスワードは8文字以上で入力してください")
    );

    form.password = "password1".to_owned();
    form.confirm_password = "password1".to_owned();
    assert_eq!(
        form.validate().unwrap_err().password.as_deref(),
        Some("パスワードは大文字、小文字、数字を含む必要があります")
    );
}

#[test]
fn mismatched_confirmation_is_rejected() {
    let mut form = valid_form();
    form.confirm_password = "Passw0rd2".to_owned();
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.confirm_password.as_deref(), Some("パスワードが一致しません"));
    assert!(errors.password.is_none());
}

#[test]
fn both_consents_are_required_but_marketing_is_not() {
    let mut form = valid_form();
    form.agree_to_privacy = false;
    assert!(form.validate().unwrap_err().terms.is_some());

    let mut form = valid_form();
    form.agree_to_terms = false;
    assert!(form.validate().unwrap_err().terms.is_some());

    let mut form = valid_form();
    form.agree_to_marketing = true;
    assert!(form.validate().unwrap().marketing_opt_in);
}

#[test]
fn clearing_a_field_removes_only_its_message() {
    let mut errors = RegistrationForm::default().validate().unwrap_err();
    errors.clear(RegistrationField::Email);
    assert!(errors.email.is_none());
    assert!(errors.name.is_some());
    assert!(!errors.is_empty());
}

#[test]
fn general_error_is_form_level() {
    let errors = RegistrationErrors::general("登録に失敗しました");
    assert_eq!(errors.general.as_deref(), Some("登録に失敗しました"));
    assert!(errors.get(RegistrationField::Name).is_none());
}

fn account() -> User {
    User {
        id: "u1".to_owned(),
        name: "山田太郎".to_owned(),
        email: "yamada@example.com".to_owned(),
        phone: None,
        plan: PlanTier::Free,
        trial_ends_at: None,
        created_at: 0,
    }
}

#[test]
fn profile_form_prefills_from_the_account() {
    let form = ProfileForm::from_user(&account());
    assert_eq!(form.name, "山田太郎");
    assert_eq!(form.email, "yamada@example.com");
    assert_eq!(form.phone, "");
}

#[test]
fn profile_phone_is_optional_but_checked_when_given() {
    let mut form = ProfileForm::from_user(&account());
    assert_eq!(form.validate().unwrap().phone, None);

    form.phone = " 090-1234-5678 ".to_owned();
    assert_eq!(form.validate().unwrap().phone.as_deref(), Some("090-1234-5678"));

    form.phone = "12345".to_owned();
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.phone.as_deref(), Some("有効な電話番号を入力してください"));
    assert!(errors.name.is_none());
}

#[test]
fn profile_rejects_blank_name_and_bad_email_together() {
    let form = ProfileForm {
        name: " ".to_owned(),
        email: "nope".to_owned(),
        phone: String::new(),
    };
    let errors = form.validate().unwrap_err();
    assert_eq!(errors.name.as_deref(), Some("お名前を入力してください"));
    assert_eq!(errors.email.as_deref(), Some("有効なメールアドレスを入力してください"));
    assert!(errors.terms.is_none());
}
