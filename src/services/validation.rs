//! Input validation for the login, registration and profile forms.
//!
//! Errors are field-scoped so the page can render each message under its
//! input and clear it as soon as the user edits that field.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::net::types::{PlanTier, User};

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 8;

/// `local@domain.tld` with no whitespace and exactly one `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // A dot with at least one character on each side.
    let chars: Vec<char> = domain.chars().collect();
    chars
        .iter()
        .enumerate()
        .any(|(i, c)| *c == '.' && i > 0 && i + 1 < chars.len())
}

/// Japanese phone number: `0` or `+81` followed by 10-11 digits, dashes ignored.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| *c != '-').collect();
    let digits = compact
        .strip_prefix("+81")
        .or_else(|| compact.strip_prefix('0'));
    digits.is_some_and(|d| (10..=11).contains(&d.len()) && d.bytes().all(|b| b.is_ascii_digit()))
}

/// At least eight characters with a lowercase letter, an uppercase letter and a digit.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Fields of the registration form that can carry an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationField {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Terms,
}

/// Raw registration form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub plan: PlanTier,
    pub agree_to_terms: bool,
    pub agree_to_privacy: bool,
    pub agree_to_marketing: bool,
}

/// Validated registration input, ready for `AuthService::register_user`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub plan: PlanTier,
    pub marketing_opt_in: bool,
}

/// Field-scoped validation messages plus one form-level message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub terms: Option<String>,
    /// Conflicts and transient failures, shown as a banner.
    pub general: Option<String>,
}

impl RegistrationErrors {
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            general: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn get(&self, field: RegistrationField) -> Option<&str> {
        match field {
            RegistrationField::Name => self.name.as_deref(),
            RegistrationField::Email => self.email.as_deref(),
            RegistrationField::Phone => self.phone.as_deref(),
            RegistrationField::Password => self.password.as_deref(),
            RegistrationField::ConfirmPassword => self.confirm_password.as_deref(),
            RegistrationField::Terms => self.terms.as_deref(),
        }
    }

    /// Drop the message for `field` once the user edits it.
    pub fn clear(&mut self, field: RegistrationField) {
        let slot = match field {
            RegistrationField::Name => &mut self.name,
            RegistrationField::Email => &mut self.email,
            RegistrationField::Phone => &mut self.phone,
            RegistrationField::Password => &mut self.password,
            RegistrationField::ConfirmPassword => &mut self.confirm_password,
            RegistrationField::Terms => &mut self.terms,
        };
        *slot = None;
    }
}

impl RegistrationForm {
    /// Check every field, returning all problems at once.
    ///
    /// # Errors
    ///
    /// Returns the field-scoped messages when any field is invalid.
    pub fn validate(&self) -> Result<RegistrationRequest, RegistrationErrors> {
        let mut errors = RegistrationErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("お名前を入力してください".to_owned());
        } else if self.name.chars().count() < MIN_NAME_CHARS {
            errors.name = Some("お名前は2文字以上で入力してください".to_owned());
        }

        if self.email.is_empty() {
            errors.email = Some("メールアドレスを入力してください".to_owned());
        } else if !is_valid_email(&self.email) {
            errors.email = Some("有効なメールアドレスを入力してください".to_owned());
        }

        if self.phone.is_empty() {
            errors.phone = Some("電話番号を入力してください".to_owned());
        } else if !is_valid_phone(&self.phone) {
            errors.phone = Some("有効な電話番号を入力してください".to_owned());
        }

        if self.password.is_empty() {
            errors.password = Some("パスワードを入力してください".to_owned());
        } else if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.password = Some("パスワードは8文字以上で入力してください".to_owned());
        } else if !is_strong_password(&self.password) {
            errors.password = Some("パスワードは大文字、小文字、数字を含む必要があります".to_owned());
        }

        if self.confirm_password.is_empty() {
            errors.confirm_password = Some("パスワード確認を入力してください".to_owned());
        } else if self.password != self.confirm_password {
            errors.confirm_password = Some("パスワードが一致しません".to_owned());
        }

        if !self.agree_to_terms || !self.agree_to_privacy {
            errors.terms = Some("利用規約とプライバシーポリシーに同意してください".to_owned());
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegistrationRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
            plan: self.plan,
            marketing_opt_in: self.agree_to_marketing,
        })
    }
}

/// Editable profile fields on the account settings page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    /// Optional; blank clears the stored number.
    pub phone: String,
}

/// Validated profile edit, ready for `AuthService::update_profile`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl ProfileForm {
    /// Prefill from the signed-in account.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    /// Same name and email rules as registration; the phone is only checked when given.
    ///
    /// # Errors
    ///
    /// Returns the field-scoped messages when any field is invalid.
    pub fn validate(&self) -> Result<ProfileUpdate, RegistrationErrors> {
        let mut errors = RegistrationErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("お名前を入力してください".to_owned());
        } else if self.name.chars().count() < MIN_NAME_CHARS {
            errors.name = Some("お名前は2文字以上で入力してください".to_owned());
        }

        if self.email.is_empty() {
            errors.email = Some("メールアドレスを入力してください".to_owned());
        } else if !is_valid_email(&self.email) {
            errors.email = Some("有効なメールアドレスを入力してください".to_owned());
        }

        let phone = self.phone.trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.phone = Some("有効な電話番号を入力してください".to_owned());
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ProfileUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
        })
    }
}
