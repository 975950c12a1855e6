use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

// Outside plant inventory: LCP (local convergence point) -> NAP (network
// access point) -> Port. VLANs are a flat list.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lcp {
    pub id: i64,
    pub name: String,
}

/// A NAP box. Its `name` is the LCP-NAP label shown on job orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nap {
    pub id: i64,
    pub name: String,
    pub lcp_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub id: i64,
    pub label: String,
    pub nap_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vlan {
    pub id: i64,
    pub value: String,
}

// ── Create requests ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateLcpRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "LCP name is required"))
    )]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateNapRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "NAP name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Select an LCP"))
    )]
    pub lcp_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreatePortRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Port label is required"))
    )]
    pub label: String,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, message = "Select a NAP"))
    )]
    pub nap_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateVlanRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 4, message = "VLAN must be 1 to 4 digits"))
    )]
    pub value: String,
}
