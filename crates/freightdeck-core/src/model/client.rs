// ── Client domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::AccountStatus;

/// Service tier. Derived from monthly contract value by
/// [`ClientTier::from_monthly_value`], never set independently.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClientTier {
    Basic,
    Standard,
    Premium,
    Enterprise,
}

impl ClientTier {
    /// Classify a monthly contract value into a tier.
    pub fn from_monthly_value(monthly_value: f64) -> Self {
        if monthly_value >= 10_000.0 {
            Self::Enterprise
        } else if monthly_value >= 5_000.0 {
            Self::Premium
        } else if monthly_value >= 1_000.0 {
            Self::Standard
        } else {
            Self::Basic
        }
    }
}

/// The canonical Client record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub address: String,
    pub region: Option<String>,
    pub industry: Option<String>,
    pub tier: ClientTier,
    pub status: AccountStatus,
    pub monthly_value: f64,
    /// 0.0 - 1.0 by convention; bucketed by `RiskLevel::classify`.
    pub risk_score: f64,
    #[serde(default)]
    pub total_shipments: u64,
    #[serde(default)]
    pub satisfaction_score: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub last_shipment: Option<DateTime<Utc>>,
}

/// Draft for `POST /clients` -- the record minus id/created_at.
#[derive(Debug, Clone, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub address: String,
    pub region: Option<String>,
    pub industry: Option<String>,
    pub status: AccountStatus,
    pub monthly_value: f64,
    pub risk_score: f64,
}

/// Partial patch for `PUT /clients/{id}`. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccountStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}
