// ── Transporter domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::AccountStatus;

/// A carrier partner. `regions_covered` and `transport_modes` are free-form
/// lists as the backend sends them; multi-bucket grouping fans a record out
/// into every region it covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transporter {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub regions_covered: Vec<String>,
    #[serde(default)]
    pub transport_modes: Vec<String>,
    /// 0.0 - 1.0 fraction of shipments delivered without incident.
    pub reliability_score: f64,
    /// 0.0 - 5.0 aggregate rating.
    #[serde(default)]
    pub performance_rating: f64,
    /// 0.0 - 1.0; bucketed by `RiskLevel::classify`.
    pub risk_score: f64,
    pub status: AccountStatus,
    #[serde(default)]
    pub total_shipments: u64,
    #[serde(default)]
    pub on_time_deliveries: u64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Transporter {
    /// On-time rate over completed shipments, 0.0 when none recorded.
    pub fn on_time_rate(&self) -> f64 {
        if self.total_shipments == 0 {
            0.0
        } else {
            self.on_time_deliveries as f64 / self.total_shipments as f64
        }
    }
}

/// Draft for `POST /transporters`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransporter {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub regions_covered: Vec<String>,
    pub transport_modes: Vec<String>,
    pub reliability_score: f64,
    pub risk_score: f64,
    pub status: AccountStatus,
}

/// Partial patch for `PUT /transporters/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransporterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions_covered: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_modes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliability_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
}
