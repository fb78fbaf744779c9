//! Submission state of the account forms.
//!
//! `Idle -> Submitting -> Redirecting` on success, back to `Idle` with an
//! error banner on failure. Forms that stay on the page after saving settle
//! back to `Idle` instead. A form that is submitting or redirecting refuses
//! another submission.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    /// Succeeded; waiting to leave the page.
    Redirecting,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub status: FormStatus,
    /// Form-level failure message.
    pub error: Option<String>,
}

impl FormState {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.status != FormStatus::Idle
    }

    /// Enter `Submitting`. Returns false, changing nothing, when already busy.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.status = FormStatus::Submitting;
        self.error = None;
        true
    }

    pub fn succeed(&mut self) {
        if self.status == FormStatus::Submitting {
            self.status = FormStatus::Redirecting;
        }
    }

    /// Succeeded without leaving the page.
    pub fn settle(&mut self) {
        if self.status == FormStatus::Submitting {
            self.status = FormStatus::Idle;
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status == FormStatus::Submitting {
            self.status = FormStatus::Idle;
            self.error = Some(message.into());
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
