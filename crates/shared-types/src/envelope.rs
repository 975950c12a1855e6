use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::AppError;

/// The `{ success, data, message, errors }` wrapper every backend endpoint
/// responds with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    /// Unwrap the payload, turning `success: false` or a missing `data` into
    /// an error built from the backend's message and errors.
    pub fn into_result(self) -> Result<T, AppError> {
        if !self.success {
            return Err(self.into_error(400));
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err(AppError::decode(
                self.message
                    .unwrap_or_else(|| "Response did not include any data".to_string()),
            )),
        }
    }

    /// Like `into_result` for endpoints whose `data` is irrelevant (deletes).
    pub fn into_ack(self) -> Result<(), AppError> {
        if self.success {
            Ok(())
        } else {
            Err(self.into_error(400))
        }
    }

    /// Build an `AppError` for the given HTTP status from this envelope.
    pub fn into_error(self, status: u16) -> AppError {
        let field_errors = self
            .errors
            .as_ref()
            .map(flatten_backend_errors)
            .unwrap_or_default();
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| field_errors.get(GENERAL_ERROR_KEY).cloned())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        AppError::from_status(status, message).with_field_errors(field_errors)
    }
}

/// Key used for backend errors that are not tied to a specific field.
pub const GENERAL_ERROR_KEY: &str = "_general";

/// Flatten the backend's `errors` value into `field -> first message`.
///
/// The backend sends either `{ "field": "msg" }`, `{ "field": ["msg", ..] }`,
/// a bare list of messages, or a single string.
pub fn flatten_backend_errors(errors: &Value) -> HashMap<String, String> {
    let mut out = HashMap::new();
    match errors {
        Value::Object(map) => {
            for (field, value) in map {
                if let Some(msg) = first_message(value) {
                    out.insert(field.clone(), msg);
                }
            }
        }
        Value::Array(_) | Value::String(_) => {
            if let Some(msg) = first_message(errors) {
                out.insert(GENERAL_ERROR_KEY.to_string(), msg);
            }
        }
        _ => {}
    }
    out
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        _ => None,
    }
}
