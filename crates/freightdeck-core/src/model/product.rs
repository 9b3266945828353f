// ── Product domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Dimensions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    /// Kilograms, > 0.
    pub weight_kg: f64,
    pub dimensions: Dimensions,
    /// Declared value of the goods.
    pub value: f64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Draft for `POST /products`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub weight_kg: f64,
    pub dimensions: Dimensions,
    pub value: f64,
}

/// Partial patch for `PUT /products/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}
