//! Shop Model

use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// Barbershop entity. Business hours plus `service_duration` drive the
/// slot grid for every booking day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shop {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub photo_path: Option<String>,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
    /// Slot length in minutes (1..=1440).
    pub service_duration: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create shop payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopCreate {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
    pub service_duration: i64,
}

/// Update shop payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub open_time: Option<TimeOfDay>,
    pub close_time: Option<TimeOfDay>,
    pub service_duration: Option<i64>,
    pub is_active: Option<bool>,
}

/// Public storefront card (search results / listings).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShopCard {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub photo_path: Option<String>,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
}

/// Hours echo returned with availability responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopHours {
    pub id: i64,
    pub open_time: TimeOfDay,
    pub close_time: TimeOfDay,
    pub service_duration: i64,
}

impl From<&Shop> for ShopHours {
    fn from(shop: &Shop) -> Self {
        Self {
            id: shop.id,
            open_time: shop.open_time,
            close_time: shop.close_time,
            service_duration: shop.service_duration,
        }
    }
}
