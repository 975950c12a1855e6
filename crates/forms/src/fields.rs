use regex::Regex;
use shared_types::AppError;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Client-side validation result: field name -> one message.
///
/// Any entry blocks submission. Only the first message per field is kept,
/// so the most specific check should run first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }

    /// `Ok(build())` when no errors were recorded.
    pub fn into_result<T>(self, build: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(build())
        } else {
            Err(self)
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        let map: HashMap<String, String> = errors.0.into_iter().collect();
        AppError::validation("Please correct the highlighted fields", map)
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, message) in AppError::from(errors).field_errors {
            out.insert(&field, message);
        }
        out
    }
}

// ── Rules ───────────────────────────────────────────────────────────

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const MOBILE_PATTERN: &str = r"^[0-9]{10,11}$";

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());
static MOBILE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(MOBILE_PATTERN).ok());

/// Matches the whole value, so surrounding whitespace fails.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value))
}

pub fn is_valid_mobile(value: &str) -> bool {
    MOBILE_RE.as_ref().is_some_and(|re| re.is_match(value))
}

/// Trimmed value, or `None` when blank.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Record "`label` is required" when `value` is blank.
pub fn required(errors: &mut FieldErrors, field: &str, label: &str, value: &str) -> Option<String> {
    let value = non_empty(value);
    if value.is_none() {
        errors.insert(field, format!("{label} is required"));
    }
    value
}

/// Record "Select a `label`" when no option is chosen.
pub fn required_choice<T: Copy>(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: Option<T>,
) -> Option<T> {
    if value.is_none() {
        errors.insert(field, format!("Select {label}"));
    }
    value
}

/// Visit crew as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrewFields {
    pub visit_by: String,
    pub visit_with: String,
    pub visit_with_other: String,
}

/// A fully specified crew.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crew {
    pub visit_by: String,
    pub visit_with: String,
    pub visit_with_other: String,
}

impl CrewFields {
    pub fn from_parts(
        visit_by: Option<&str>,
        visit_with: Option<&str>,
        visit_with_other: Option<&str>,
    ) -> Self {
        Self {
            visit_by: visit_by.unwrap_or_default().to_string(),
            visit_with: visit_with.unwrap_or_default().to_string(),
            visit_with_other: visit_with_other.unwrap_or_default().to_string(),
        }
    }

    /// All three members required.
    pub fn require_full(&self, errors: &mut FieldErrors) -> Option<Crew> {
        let visit_by = required(errors, "visit_by", "Visit by", &self.visit_by);
        let visit_with = required(errors, "visit_with", "Visit with", &self.visit_with);
        let visit_with_other = required(
            errors,
            "visit_with_other",
            "Visit with (other)",
            &self.visit_with_other,
        );
        Some(Crew {
            visit_by: visit_by?,
            visit_with: visit_with?,
            visit_with_other: visit_with_other?,
        })
    }
}
