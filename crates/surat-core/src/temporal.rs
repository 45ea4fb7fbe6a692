//! # Temporal Types: Calendar Dates and Epoch Milliseconds
//!
//! Two temporal values appear in an attested letter payload:
//!
//! - the resident's date of birth, a [`CalendarDate`] with day precision;
//! - the issuance instant, an [`EpochMillis`] captured at proof generation.
//!
//! ## Security Invariant
//!
//! Both render without locale or timezone input. `CalendarDate` always
//! serializes as `YYYY-MM-DD` (any time-of-day in the source is discarded at
//! construction), and `EpochMillis` serializes as a JSON integer. The same
//! facts therefore canonicalize to the same bytes on every host.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date with day precision, rendered as `YYYY-MM-DD`.
///
/// # Construction
///
/// - [`CalendarDate::from_naive()`]: from a `chrono::NaiveDate`.
/// - [`CalendarDate::from_datetime()`]: from a UTC instant, truncated to its day.
/// - [`CalendarDate::parse()`]: strict `YYYY-MM-DD` parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Wrap a `NaiveDate`.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] for impossible dates such as
    /// February 30th.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Truncate a UTC instant to its calendar day.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.date_naive())
    }

    /// Parse a strict `YYYY-MM-DD` string.
    ///
    /// Rejects anything that would not render back to the identical string:
    /// missing zero padding, trailing time components, surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDate`] if the string is not a valid
    /// zero-padded calendar date.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(s.to_string()))?;
        let parsed = Self(date);
        if parsed.to_iso_date() != s {
            return Err(ValidationError::InvalidDate(s.to_string()));
        }
        Ok(parsed)
    }

    /// Access the inner `NaiveDate`.
    pub fn as_naive(&self) -> &NaiveDate {
        &self.0
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso_date(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso_date())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_iso_date())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Milliseconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    /// Read the current UTC wall clock.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Wrap a raw millisecond count.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The raw millisecond count.
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Convert to a UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TimestampOutOfRange`] if chrono cannot
    /// represent the instant.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, ValidationError> {
        DateTime::from_timestamp_millis(self.0).ok_or(ValidationError::TimestampOutOfRange(self.0))
    }
}

impl From<DateTime<Utc>> for EpochMillis {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl std::fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
