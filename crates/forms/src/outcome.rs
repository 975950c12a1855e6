use serde::Serialize;
use shared_types::AppError;
use std::fmt;

/// Severity of one step's result, shown as a banner line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub level: OutcomeLevel,
    pub message: String,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            OutcomeLevel::Success => "ok",
            OutcomeLevel::Warning => "warn",
            OutcomeLevel::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// What a submit sequence did, step by step, and the record it left behind.
///
/// `saved` may be set even when a later step failed; partial success is
/// reported, never rolled back.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport<T> {
    pub outcomes: Vec<Outcome>,
    pub saved: Option<T>,
}

impl<T> Default for SubmitReport<T> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
            saved: None,
        }
    }
}

impl<T> SubmitReport<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, level: OutcomeLevel, message: impl Into<String>) {
        self.outcomes.push(Outcome {
            level,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(OutcomeLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "Submit step warning");
        self.push(OutcomeLevel::Warning, message);
    }

    /// Record a failed step. The banner text includes backend field errors.
    pub fn fail(&mut self, context: &str, err: &AppError) {
        tracing::error!(error = %err, "{context}");
        self.push(OutcomeLevel::Error, format!("{context}: {}", err.user_message()));
    }

    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|o| o.level == OutcomeLevel::Error)
    }

    pub fn finish(mut self, saved: T) -> Self {
        self.saved = Some(saved);
        self
    }
}
