use serde::{Deserialize, Serialize};

// Address hierarchy: Region -> City -> Barangay -> LocationDetail.
// Each level is fetched as a flat list and narrowed client-side by its
// parent id.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub region_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barangay {
    pub id: i64,
    pub name: String,
    pub city_id: i64,
}

/// A sitio/purok/subdivision inside a barangay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDetail {
    pub id: i64,
    pub name: String,
    pub barangay_id: i64,
}
