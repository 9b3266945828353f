// ── Shipment domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Dimensions, RiskLevel};

/// Shipment lifecycle. Unrecognised wire values land in `Unknown` so a
/// backend rollout of a new status cannot break deserialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    InTransit,
    Delivered,
    Delayed,
    #[serde(other)]
    Unknown,
}

impl ShipmentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// The canonical Shipment record. Foreign keys reference records held in
/// the sibling stores; they are looked up lazily, never embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub id: u64,
    pub client_id: u64,
    pub product_id: Option<u64>,
    pub driver_id: Option<u64>,
    pub transporter_id: Option<u64>,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub transport_mode: String,
    pub weight_kg: f64,
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub special_services: Vec<String>,
    #[serde(default)]
    pub confidence_score: f64,
    /// Metres, from the routing service.
    pub route_distance_m: Option<f64>,
    /// Seconds, from the routing service.
    pub route_duration_s: Option<f64>,
    pub total_cost: Option<f64>,
    pub risk_level: RiskLevel,
    pub created_at: Option<DateTime<Utc>>,
}

/// Draft for `POST /shipments`.
#[derive(Debug, Clone, Serialize)]
pub struct NewShipment {
    pub client_id: u64,
    pub product_id: Option<u64>,
    pub driver_id: Option<u64>,
    pub transporter_id: Option<u64>,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub transport_mode: String,
    pub weight_kg: f64,
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub special_services: Vec<String>,
}

/// Partial patch for `PUT /shipments/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShipmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporter_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShipmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}
