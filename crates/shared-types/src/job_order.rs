use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{parse_choice, ImageSlot};

// ── Status enums ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobOrderStatus {
    Confirmed,
    #[serde(rename = "For Confirmation")]
    ForConfirmation,
    Cancelled,
}

impl JobOrderStatus {
    pub const ALL: &'static [JobOrderStatus] = &[
        JobOrderStatus::Confirmed,
        JobOrderStatus::ForConfirmation,
        JobOrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobOrderStatus::Confirmed => "Confirmed",
            JobOrderStatus::ForConfirmation => "For Confirmation",
            JobOrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(Self::ALL, value, Self::as_str)
    }
}

impl fmt::Display for JobOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnsiteStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
    Failed,
    Reschedule,
}

impl OnsiteStatus {
    pub const ALL: &'static [OnsiteStatus] = &[
        OnsiteStatus::InProgress,
        OnsiteStatus::Done,
        OnsiteStatus::Failed,
        OnsiteStatus::Reschedule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OnsiteStatus::InProgress => "In Progress",
            OnsiteStatus::Done => "Done",
            OnsiteStatus::Failed => "Failed",
            OnsiteStatus::Reschedule => "Reschedule",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(Self::ALL, value, Self::as_str)
    }
}

impl fmt::Display for OnsiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    Antenna,
    Fiber,
    Local,
}

impl ConnectionType {
    pub const ALL: &'static [ConnectionType] = &[
        ConnectionType::Antenna,
        ConnectionType::Fiber,
        ConnectionType::Local,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionType::Antenna => "Antenna",
            ConnectionType::Fiber => "Fiber",
            ConnectionType::Local => "Local",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(Self::ALL, value, Self::as_str)
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Evidence photos ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobOrderImage {
    SignedContract,
    Setup,
    BoxReading,
    RouterReading,
    SpeedTest,
    HouseFront,
    ClientSignature,
    /// Only required for Antenna and Local connections.
    PortLabel,
}

impl JobOrderImage {
    /// Photos every completed installation must carry.
    pub const REQUIRED_ON_DONE: [JobOrderImage; 7] = [
        JobOrderImage::SignedContract,
        JobOrderImage::Setup,
        JobOrderImage::BoxReading,
        JobOrderImage::RouterReading,
        JobOrderImage::SpeedTest,
        JobOrderImage::HouseFront,
        JobOrderImage::ClientSignature,
    ];

    pub const ALL: [JobOrderImage; 8] = [
        JobOrderImage::SignedContract,
        JobOrderImage::Setup,
        JobOrderImage::BoxReading,
        JobOrderImage::RouterReading,
        JobOrderImage::SpeedTest,
        JobOrderImage::HouseFront,
        JobOrderImage::ClientSignature,
        JobOrderImage::PortLabel,
    ];
}

impl ImageSlot for JobOrderImage {
    fn field_name(&self) -> &'static str {
        match self {
            JobOrderImage::SignedContract => "signed_contract_image",
            JobOrderImage::Setup => "setup_image",
            JobOrderImage::BoxReading => "box_reading_image",
            JobOrderImage::RouterReading => "router_reading_image",
            JobOrderImage::SpeedTest => "speed_test_image",
            JobOrderImage::HouseFront => "house_front_image",
            JobOrderImage::ClientSignature => "client_signature_image",
            JobOrderImage::PortLabel => "port_label_image",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            JobOrderImage::SignedContract => "Signed contract",
            JobOrderImage::Setup => "Setup",
            JobOrderImage::BoxReading => "Box reading",
            JobOrderImage::RouterReading => "Router reading",
            JobOrderImage::SpeedTest => "Speed test",
            JobOrderImage::HouseFront => "House front",
            JobOrderImage::ClientSignature => "Client signature",
            JobOrderImage::PortLabel => "Port label",
        }
    }
}

/// Persisted photo URLs, one per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOrderImageUrls {
    #[serde(default)]
    pub signed_contract_image_url: Option<String>,
    #[serde(default)]
    pub setup_image_url: Option<String>,
    #[serde(default)]
    pub box_reading_image_url: Option<String>,
    #[serde(default)]
    pub router_reading_image_url: Option<String>,
    #[serde(default)]
    pub speed_test_image_url: Option<String>,
    #[serde(default)]
    pub house_front_image_url: Option<String>,
    #[serde(default)]
    pub client_signature_image_url: Option<String>,
    #[serde(default)]
    pub port_label_image_url: Option<String>,
}

impl JobOrderImageUrls {
    fn slot_mut(&mut self, slot: JobOrderImage) -> &mut Option<String> {
        match slot {
            JobOrderImage::SignedContract => &mut self.signed_contract_image_url,
            JobOrderImage::Setup => &mut self.setup_image_url,
            JobOrderImage::BoxReading => &mut self.box_reading_image_url,
            JobOrderImage::RouterReading => &mut self.router_reading_image_url,
            JobOrderImage::SpeedTest => &mut self.speed_test_image_url,
            JobOrderImage::HouseFront => &mut self.house_front_image_url,
            JobOrderImage::ClientSignature => &mut self.client_signature_image_url,
            JobOrderImage::PortLabel => &mut self.port_label_image_url,
        }
    }

    pub fn get(&self, slot: JobOrderImage) -> Option<&str> {
        let url = match slot {
            JobOrderImage::SignedContract => &self.signed_contract_image_url,
            JobOrderImage::Setup => &self.setup_image_url,
            JobOrderImage::BoxReading => &self.box_reading_image_url,
            JobOrderImage::RouterReading => &self.router_reading_image_url,
            JobOrderImage::SpeedTest => &self.speed_test_image_url,
            JobOrderImage::HouseFront => &self.house_front_image_url,
            JobOrderImage::ClientSignature => &self.client_signature_image_url,
            JobOrderImage::PortLabel => &self.port_label_image_url,
        };
        url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn set(&mut self, slot: JobOrderImage, url: impl Into<String>) {
        *self.slot_mut(slot) = Some(url.into());
    }
}

// ── Records ─────────────────────────────────────────────────────────

/// Installation workflow for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOrder {
    pub id: i64,
    pub application_id: i64,
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
    pub desired_plan: String,
    #[serde(default)]
    pub promo: Option<String>,
    pub status: JobOrderStatus,
    #[serde(default)]
    pub onsite_status: Option<OnsiteStatus>,
    #[serde(default)]
    pub connection_type: Option<ConnectionType>,
    #[serde(default)]
    pub date_installed: Option<NaiveDate>,
    #[serde(default)]
    pub usage_type: Option<String>,
    /// `"lat, lng"` as captured by the device.
    #[serde(default)]
    pub coordinates: Option<String>,
    #[serde(default)]
    pub router_model: Option<String>,
    #[serde(default)]
    pub modem_sn: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub lcpnap: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub vlan: Option<String>,
    #[serde(default)]
    pub visit_by: Option<String>,
    #[serde(default)]
    pub visit_with: Option<String>,
    #[serde(default)]
    pub visit_with_other: Option<String>,
    #[serde(default)]
    pub onsite_remarks: Option<String>,
    #[serde(default)]
    pub status_remarks: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(flatten)]
    pub images: JobOrderImageUrls,
    #[serde(default)]
    pub pppoe_username: Option<String>,
    #[serde(default)]
    pub pppoe_password: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl JobOrder {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn has_radius_account(&self) -> bool {
        self.pppoe_username
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty())
    }
}

/// Body for `PUT /job-orders/{id}`. Fields a stage does not use are sent
/// as explicit nulls so stale values are cleared server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOrderUpdate {
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
    pub desired_plan: String,
    pub promo: Option<String>,
    pub status: Option<JobOrderStatus>,
    pub onsite_status: Option<OnsiteStatus>,
    pub connection_type: Option<ConnectionType>,
    pub date_installed: Option<NaiveDate>,
    pub usage_type: Option<String>,
    pub coordinates: Option<String>,
    pub router_model: Option<String>,
    pub modem_sn: Option<String>,
    pub ip: Option<String>,
    pub lcpnap: Option<String>,
    pub port: Option<String>,
    pub vlan: Option<String>,
    pub visit_by: Option<String>,
    pub visit_with: Option<String>,
    pub visit_with_other: Option<String>,
    pub onsite_remarks: Option<String>,
    pub status_remarks: Option<String>,
    pub group: Option<String>,
    pub updated_by: Option<String>,
}

/// PPPoE credentials provisioned on the RADIUS server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusAccount {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// An inventory item consumed by a job order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOrderItem {
    pub id: i64,
    pub job_order_id: i64,
    pub item_name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJobOrderItem {
    pub job_order_id: i64,
    pub item_name: String,
    pub quantity: i64,
}
