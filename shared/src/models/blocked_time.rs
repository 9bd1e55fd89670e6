//! Blocked Time Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::{TimeOfDay, WeekdaySet};

/// How a blocked-time rule repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum RecurrenceType {
    Daily,
    Weekly,
}

/// A rule carving time out of a shop's bookable day. `date` is the
/// occurrence date for one-off rules and the anchor (creation) date for
/// recurring ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BlockedTime {
    pub id: i64,
    pub shop_id: i64,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub reason: Option<String>,
    pub recurring: bool,
    pub recurrence_type: Option<RecurrenceType>,
    pub days_of_week: Option<WeekdaySet>,
    pub created_at: i64,
}

/// Create payload. Date and times are strings so the handler can report
/// missing or malformed values field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedTimeCreate {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub reason: Option<String>,
    #[serde(default)]
    pub recurring: bool,
    pub recurrence_type: Option<RecurrenceType>,
    pub days_of_week: Option<WeekdaySet>,
}
