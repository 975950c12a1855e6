use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{parse_choice, ImageSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "For Visit")]
    ForVisit,
    Resolved,
    Failed,
}

impl SupportStatus {
    pub const ALL: &'static [SupportStatus] = &[
        SupportStatus::InProgress,
        SupportStatus::ForVisit,
        SupportStatus::Resolved,
        SupportStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportStatus::InProgress => "In Progress",
            SupportStatus::ForVisit => "For Visit",
            SupportStatus::Resolved => "Resolved",
            SupportStatus::Failed => "Failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(Self::ALL, value, Self::as_str)
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a repair visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceVisitStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
    Reschedule,
    Failed,
}

impl ServiceVisitStatus {
    pub const ALL: &'static [ServiceVisitStatus] = &[
        ServiceVisitStatus::InProgress,
        ServiceVisitStatus::Done,
        ServiceVisitStatus::Reschedule,
        ServiceVisitStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceVisitStatus::InProgress => "In Progress",
            ServiceVisitStatus::Done => "Done",
            ServiceVisitStatus::Reschedule => "Reschedule",
            ServiceVisitStatus::Failed => "Failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_choice(Self::ALL, value, Self::as_str)
    }
}

impl fmt::Display for ServiceVisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOrderImage {
    BoxReading,
    RouterReading,
    SpeedTest,
    ClientSignature,
}

impl ServiceOrderImage {
    pub const ALL: [ServiceOrderImage; 4] = [
        ServiceOrderImage::BoxReading,
        ServiceOrderImage::RouterReading,
        ServiceOrderImage::SpeedTest,
        ServiceOrderImage::ClientSignature,
    ];
}

impl ImageSlot for ServiceOrderImage {
    fn field_name(&self) -> &'static str {
        match self {
            ServiceOrderImage::BoxReading => "box_reading_image",
            ServiceOrderImage::RouterReading => "router_reading_image",
            ServiceOrderImage::SpeedTest => "speed_test_image",
            ServiceOrderImage::ClientSignature => "client_signature_image",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ServiceOrderImage::BoxReading => "Box reading",
            ServiceOrderImage::RouterReading => "Router reading",
            ServiceOrderImage::SpeedTest => "Speed test",
            ServiceOrderImage::ClientSignature => "Client signature",
        }
    }
}

/// Persisted photo URLs of a service order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrderImageUrls {
    #[serde(default)]
    pub box_reading_image_url: Option<String>,
    #[serde(default)]
    pub router_reading_image_url: Option<String>,
    #[serde(default)]
    pub speed_test_image_url: Option<String>,
    #[serde(default)]
    pub client_signature_image_url: Option<String>,
}

impl ServiceOrderImageUrls {
    pub fn get(&self, slot: ServiceOrderImage) -> Option<&str> {
        let url = match slot {
            ServiceOrderImage::BoxReading => &self.box_reading_image_url,
            ServiceOrderImage::RouterReading => &self.router_reading_image_url,
            ServiceOrderImage::SpeedTest => &self.speed_test_image_url,
            ServiceOrderImage::ClientSignature => &self.client_signature_image_url,
        };
        url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn set(&mut self, slot: ServiceOrderImage, url: impl Into<String>) {
        let target = match slot {
            ServiceOrderImage::BoxReading => &mut self.box_reading_image_url,
            ServiceOrderImage::RouterReading => &mut self.router_reading_image_url,
            ServiceOrderImage::SpeedTest => &mut self.speed_test_image_url,
            ServiceOrderImage::ClientSignature => &mut self.client_signature_image_url,
        };
        *target = Some(url.into());
    }
}

/// Repair/support ticket for an existing subscriber account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrder {
    pub id: i64,
    pub account_no: String,
    pub full_name: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
    pub concern: String,
    #[serde(default)]
    pub concern_remarks: Option<String>,
    pub support_status: SupportStatus,
    #[serde(default)]
    pub support_remarks: Option<String>,
    #[serde(default)]
    pub visit_status: Option<ServiceVisitStatus>,
    #[serde(default)]
    pub repair_category: Option<String>,
    #[serde(default)]
    pub visit_by: Option<String>,
    #[serde(default)]
    pub visit_with: Option<String>,
    #[serde(default)]
    pub visit_with_other: Option<String>,
    #[serde(default)]
    pub visit_remarks: Option<String>,
    #[serde(flatten)]
    pub images: ServiceOrderImageUrls,
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Body for `PUT /service-orders/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrderUpdate {
    pub concern: String,
    pub concern_remarks: Option<String>,
    pub support_status: Option<SupportStatus>,
    pub support_remarks: Option<String>,
    pub visit_status: Option<ServiceVisitStatus>,
    pub repair_category: Option<String>,
    pub visit_by: Option<String>,
    pub visit_with: Option<String>,
    pub visit_with_other: Option<String>,
    pub visit_remarks: Option<String>,
    #[serde(flatten)]
    pub images: ServiceOrderImageUrls,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrderItem {
    pub id: i64,
    pub service_order_id: i64,
    pub item_name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewServiceOrderItem {
    pub service_order_id: i64,
    pub item_name: String,
    pub quantity: i64,
}
