use std::future::Future;

use crate::fields::FieldErrors;
use crate::outcome::{Outcome, SubmitReport};

/// Whether a form creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// Lifecycle of an open form.
///
/// `Idle -> Validating -> Idle` (invalid) or `-> Submitting -> Closed`
/// (saved) or `-> Idle` (a step failed, banner set, retry allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    Closed,
}

/// One open modal: the mutable form record plus its validation errors and
/// the banner from the last submit attempt.
#[derive(Debug, Clone)]
pub struct FormSession<F> {
    form: F,
    phase: FormPhase,
    errors: FieldErrors,
    banner: Vec<Outcome>,
}

impl<F> FormSession<F> {
    pub fn open(form: F) -> Self {
        Self {
            form,
            phase: FormPhase::Idle,
            errors: FieldErrors::new(),
            banner: Vec::new(),
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn banner(&self) -> &[Outcome] {
        &self.banner
    }

    pub fn is_closed(&self) -> bool {
        self.phase == FormPhase::Closed
    }

    /// Dismiss the modal. Unsaved edits are discarded and later saves are
    /// ignored.
    pub fn close(&mut self) {
        self.phase = FormPhase::Closed;
        self.errors = FieldErrors::new();
        self.banner.clear();
    }

    /// Validate, then submit. No request is made when validation fails.
    ///
    /// `on_save` runs only when every step succeeded; the session then
    /// closes. Otherwise it stays open with the step outcomes in the banner.
    pub async fn run<V, T, Fut>(
        &mut self,
        validate: impl FnOnce(&F) -> Result<V, FieldErrors>,
        submit: impl FnOnce(V) -> Fut,
        on_save: impl FnOnce(&T),
    ) -> FormPhase
    where
        Fut: Future<Output = SubmitReport<T>>,
    {
        if self.phase == FormPhase::Closed {
            return self.phase;
        }

        self.phase = FormPhase::Validating;
        self.banner.clear();
        let validated = match validate(&self.form) {
            Ok(validated) => validated,
            Err(errors) => {
                tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Form is invalid");
                self.errors = errors;
                self.phase = FormPhase::Idle;
                return self.phase;
            }
        };

        self.errors = FieldErrors::new();
        self.phase = FormPhase::Submitting;
        let report = submit(validated).await;
        let failed = report.has_errors();
        self.banner = report.outcomes;

        self.phase = match report.saved {
            Some(record) if !failed => {
                on_save(&record);
                FormPhase::Closed
            }
            _ => FormPhase::Idle,
        };
        self.phase
    }
}
