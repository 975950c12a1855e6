use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is operating the app. Technicians work job orders and visits in the
/// field; office staff confirm, cancel and reassign records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Technician,
    Office,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Technician => "technician",
            Role::Office => "office",
        }
    }

    /// Only office staff may move a record's top-level status.
    pub fn can_change_status(&self) -> bool {
        matches!(self, Role::Office)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in user, as returned by the backend login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Cached auth state read from device storage at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: SessionUser,
    pub access_token: String,
}

/// Look up an enum variant by its wire string.
pub fn parse_choice<T: Copy>(all: &[T], value: &str, as_str: fn(&T) -> &'static str) -> Option<T> {
    let value = value.trim();
    all.iter().copied().find(|v| as_str(v) == value)
}
