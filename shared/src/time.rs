//! Wall-clock types for business hours and slot math.
//!
//! Times-of-day travel through the API and the database as `"HH:MM"`
//! strings but are compared and added as minutes since midnight, so
//! `"09:00" < "10:30"` is an integer comparison, not a string one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, de};
use thiserror::Error;

/// Parse failure for `"HH:MM"` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("time must be in HH:MM format, got '{0}'")]
    BadFormat(String),
    #[error("time '{0}' is out of range (hours 0-23, minutes 0-59)")]
    OutOfRange(String),
}

/// A time of day with minute precision, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < Self::MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Add minutes, returning `None` once the result leaves the day.
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        let total = u32::from(self.0) + u32::from(minutes);
        u16::try_from(total).ok().and_then(Self::from_minutes)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| TimeParseError::BadFormat(s.to_string()))?;
        let hour: u8 = h
            .parse()
            .map_err(|_| TimeParseError::BadFormat(s.to_string()))?;
        let minute: u8 = m
            .parse()
            .map_err(|_| TimeParseError::BadFormat(s.to_string()))?;
        Self::new(hour, minute).ok_or_else(|| TimeParseError::OutOfRange(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Day of week, serialized as the lowercase English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of weekdays for weekly recurrence, serialized as a JSON array of
/// lowercase names (the same shape it is stored in).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdaySet(Vec<Weekday>);

impl WeekdaySet {
    pub fn new(days: Vec<Weekday>) -> Self {
        Self(days)
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Weekday>> for WeekdaySet {
    fn from(days: Vec<Weekday>) -> Self {
        Self(days)
    }
}

// ===== SQLite codecs (TEXT columns) =====

#[cfg(feature = "db")]
mod db_impls {
    use super::{TimeOfDay, WeekdaySet};

    impl sqlx::Type<sqlx::Sqlite> for TimeOfDay {
        fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
            <&str as sqlx::Type<sqlx::Sqlite>>::type_info()
        }

        fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
            <&str as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
        }
    }

    impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for TimeOfDay {
        fn encode_by_ref(
            &self,
            buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
        ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
            <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode(self.to_string(), buf)
        }
    }

    impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for TimeOfDay {
        fn decode(
            value: sqlx::sqlite::SqliteValueRef<'r>,
        ) -> Result<Self, sqlx::error::BoxDynError> {
            let s = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
            Ok(s.parse()?)
        }
    }

    impl sqlx::Type<sqlx::Sqlite> for WeekdaySet {
        fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
            <&str as sqlx::Type<sqlx::Sqlite>>::type_info()
        }

        fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
            <&str as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
        }
    }

    impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for WeekdaySet {
        fn encode_by_ref(
            &self,
            buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
        ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
            let json = serde_json::to_string(self)?;
            <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode(json, buf)
        }
    }

    impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for WeekdaySet {
        fn decode(
            value: sqlx::sqlite::SqliteValueRef<'r>,
        ) -> Result<Self, sqlx::error::BoxDynError> {
            let s = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
            Ok(serde_json::from_str(s)?)
        }
    }
}
