use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{parse_choice, ApplicationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
    Failed,
    Reschedule,
    Cancelled,
}

impl VisitStatus {
    pub const ALL: &'static [VisitStatus] = &[
        VisitStatus::Scheduled,
        VisitStatus::InProgress,
        VisitStatus::Done,
        VisitStatus::Failed,
        VisitStatus::Reschedule,
        VisitStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Scheduled => "Scheduled",
            VisitStatus::InProgress => "In Progress",
            VisitStatus::Done => "Done",
            VisitStatus::Failed => "Failed",
            VisitStatus::Reschedule => "Reschedule",
            VisitStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(Self::ALL, value, Self::as_str)
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled site visit for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationVisit {
    pub id: i64,
    pub application_id: i64,
    /// Email of the assigned technician.
    pub assigned_email: String,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    pub visit_status: VisitStatus,
    #[serde(default)]
    pub visit_by: Option<String>,
    #[serde(default)]
    pub visit_with: Option<String>,
    #[serde(default)]
    pub visit_with_other: Option<String>,
    #[serde(default)]
    pub visit_remarks: Option<String>,
    /// What the technician found on site.
    #[serde(default)]
    pub outcome: Option<ApplicationStatus>,
    // Location snapshot copied from the application when scheduled.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub barangay: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Body for `POST /application-visits` and `PUT /application-visits/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRequest {
    pub application_id: i64,
    pub assigned_email: String,
    pub scheduled_date: NaiveDate,
    pub visit_status: VisitStatus,
    pub visit_by: Option<String>,
    pub visit_with: Option<String>,
    pub visit_with_other: Option<String>,
    pub visit_remarks: Option<String>,
    pub outcome: Option<ApplicationStatus>,
    // Address snapshot, only sent when the visit is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barangay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}
