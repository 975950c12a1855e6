use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse_choice;

/// Lifecycle of a prospective subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "schedule")]
    Schedule,
    #[serde(rename = "no facility")]
    NoFacility,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "no slot")]
    NoSlot,
    #[serde(rename = "duplicate")]
    Duplicate,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl ApplicationStatus {
    pub const ALL: &'static [ApplicationStatus] = &[
        ApplicationStatus::Pending,
        ApplicationStatus::Schedule,
        ApplicationStatus::NoFacility,
        ApplicationStatus::Cancelled,
        ApplicationStatus::NoSlot,
        ApplicationStatus::Duplicate,
        ApplicationStatus::InProgress,
        ApplicationStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Schedule => "schedule",
            ApplicationStatus::NoFacility => "no facility",
            ApplicationStatus::Cancelled => "cancelled",
            ApplicationStatus::NoSlot => "no slot",
            ApplicationStatus::Duplicate => "duplicate",
            ApplicationStatus::InProgress => "in progress",
            ApplicationStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(Self::ALL, value, Self::as_str)
    }

    /// Outcomes a technician may report after a site visit.
    pub fn is_visit_outcome(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::InProgress
                | ApplicationStatus::NoFacility
                | ApplicationStatus::NoSlot
                | ApplicationStatus::Cancelled
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prospective subscriber as stored by the backend.
///
/// The address hierarchy is stored by name, not id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub mobile_number: String,
    #[serde(default)]
    pub secondary_mobile_number: Option<String>,
    pub email: String,
    pub region: String,
    pub city: String,
    pub barangay: String,
    #[serde(default)]
    pub location: Option<String>,
    pub street_address: String,
    #[serde(default)]
    pub landmark: Option<String>,
    pub desired_plan: String,
    #[serde(default)]
    pub promo: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub terms_and_conditions: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Application {
    pub fn full_name(&self) -> String {
        match self.middle_initial.as_deref().filter(|m| !m.is_empty()) {
            Some(mi) => format!("{} {}. {}", self.first_name, mi.trim_end_matches('.'), self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Single-line address used for visit location snapshots.
    pub fn full_address(&self) -> String {
        let mut parts = vec![self.street_address.as_str()];
        if let Some(loc) = self.location.as_deref().filter(|l| !l.is_empty()) {
            parts.push(loc);
        }
        parts.extend([self.barangay.as_str(), self.city.as_str(), self.region.as_str()]);
        parts
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Body for `POST /applications` and `PUT /applications/{id}`.
///
/// Optional fields serialize as `null` so an edit can clear them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    pub mobile_number: String,
    pub secondary_mobile_number: Option<String>,
    pub email: String,
    pub region: String,
    pub city: String,
    pub barangay: String,
    pub location: Option<String>,
    pub street_address: String,
    pub landmark: Option<String>,
    pub desired_plan: String,
    pub promo: Option<String>,
    pub status: ApplicationStatus,
    pub terms_and_conditions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Partial update used when a visit moves the application forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationStatusUpdate {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}
