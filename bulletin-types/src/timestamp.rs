//! ISO-8601 timestamps as carried on the wire.
//!
//! The API sends dates as RFC 3339 strings (`2024-05-01T10:00:00.000Z`), but
//! any offset and any fraction precision are valid input. Parsing
//! normalizes every timestamp to one canonical form: UTC, millisecond
//! precision, `Z` suffix. In that form lexicographic order equals
//! chronological order, which is what the newest-first tables sort by and
//! what the incremental fetch cursor relies on.

use crate::Error;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(String);

impl Timestamp {
    /// Parses an RFC 3339 timestamp and normalizes it to UTC milliseconds.
    /// Sub-millisecond digits are truncated.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let parsed = DateTime::parse_from_rfc3339(s)
            .map_err(|e| Error::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self::from_datetime(parsed.with_timezone(&Utc)))
    }

    /// The current time in UTC with millisecond precision.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Formats a UTC datetime the way the API does.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Returns the canonical timestamp string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to a UTC datetime.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, Error> {
        DateTime::parse_from_rfc3339(&self.0)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::InvalidTimestamp(format!("{:?}: {e}", self.0)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
