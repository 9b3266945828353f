// ── Shared domain types ──

use serde::{Deserialize, Serialize};

// ── Dimensions ──────────────────────────────────────────────────────

/// Physical dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }

    /// Volume in cubic metres.
    pub fn volume_m3(&self) -> f64 {
        (self.length_cm * self.width_cm * self.height_cm) / 1_000_000.0
    }
}

// ── Risk classification ─────────────────────────────────────────────

/// Upper bound of the low-risk band (inclusive).
pub const LOW_RISK_MAX: f64 = 0.10;
/// Upper bound of the medium-risk band (inclusive).
pub const MEDIUM_RISK_MAX: f64 = 0.20;

/// Risk bucket for a record.
///
/// `Unknown` only ever comes off the wire -- [`RiskLevel::classify`] is a
/// total function over scores and returns one of the three real bands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    /// Bucket a numeric risk score: low <= 0.10 < medium <= 0.20 < high.
    pub fn classify(score: f64) -> Self {
        if score <= LOW_RISK_MAX {
            Self::Low
        } else if score <= MEDIUM_RISK_MAX {
            Self::Medium
        } else {
            Self::High
        }
    }
}

// ── Account status ──────────────────────────────────────────────────

/// Lifecycle status shared by clients and transporters. Anything the
/// backend sends outside the closed set lands in `Unknown`; aggregation
/// treats it as its own bucket rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Pending,
    UnderReview,
    #[serde(other)]
    Unknown,
}

impl AccountStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}
