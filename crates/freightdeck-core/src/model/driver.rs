// ── Driver domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: u64,
    pub name: String,
    pub license_number: String,
    pub phone: String,
    pub email: String,
    pub vehicle_type: String,
    pub capacity_kg: f64,
    /// Whether the driver can take a new assignment right now.
    pub availability: bool,
    pub current_location: Option<String>,
    /// 0.0 - 5.0 aggregate rating.
    #[serde(default)]
    pub rating: f64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Draft for `POST /drivers`.
#[derive(Debug, Clone, Serialize)]
pub struct NewDriver {
    pub name: String,
    pub license_number: String,
    pub phone: String,
    pub email: String,
    pub vehicle_type: String,
    pub capacity_kg: f64,
    pub availability: bool,
    pub current_location: Option<String>,
}

/// Partial patch for `PUT /drivers/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriverPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
}
