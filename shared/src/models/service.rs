//! Service Model (per-shop catalog)

use serde::{Deserialize, Serialize};

/// A service offered by a shop (corte, barba, ...). Price in BRL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Service {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Informational override; slot math always uses the shop duration.
    pub duration_minutes: Option<i64>,
    pub position: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: Option<i64>,
    pub position: Option<i64>,
}

/// Update service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i64>,
    pub position: Option<i64>,
    pub is_active: Option<bool>,
}
