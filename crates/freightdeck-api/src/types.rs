// ── Protocol-level wire types ──
//
// Shapes owned by the backend protocol rather than the domain model:
// resource path segments, the health probe, upload receipts, and the
// ETA calculation/prediction payloads. Entity payloads themselves stay
// generic -- the gateway never interprets them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The five entity collections the backend exposes under a uniform
/// REST pattern (`GET /{kind}`, `POST /{kind}`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Clients,
    Products,
    Drivers,
    Transporters,
    Shipments,
}

impl EntityKind {
    /// The path segment for this collection.
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Products => "products",
            Self::Drivers => "drivers",
            Self::Transporters => "transporters",
            Self::Shipments => "shipments",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}

/// `GET /health` response. Used only to probe reachability.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// `POST /upload/{kind}` response for a bulk CSV import.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    pub success: bool,
    pub message: String,
    pub count: u64,
}

/// Body for `POST /shipments/calculate-eta`.
#[derive(Debug, Clone, Serialize)]
pub struct EtaRequest {
    pub origin: String,
    pub destination: String,
}

/// Route-based ETA calculation returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct EtaQuote {
    pub estimated_eta: DateTime<Utc>,
    /// 0.0 - 1.0.
    pub confidence_score: f64,
    /// Metres.
    pub route_distance: f64,
    /// Seconds.
    pub route_duration: f64,
    #[serde(default)]
    pub weather_delay_factor: Option<f64>,
}

/// AI-assisted ETA prediction for an existing shipment.
///
/// Also the shape the local placeholder synthesizes when the prediction
/// backend is unreachable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtaPrediction {
    pub shipment_id: u64,
    pub predicted_eta: DateTime<Utc>,
    /// Percentage, 0 - 100.
    pub confidence: f64,
    pub factors: Vec<String>,
    pub risk_level: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
