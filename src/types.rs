//! Common types used throughout the cloud client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple resource modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Task Results
// ============================================================================

/// Body returned by asynchronous operations (create/delete) that spawn tasks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskResults {
    /// IDs of the tasks started by the operation
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl TaskResults {
    /// First task ID, if any
    pub fn first(&self) -> Option<&str> {
        self.tasks.first().map(String::as_str)
    }
}

// ============================================================================
// Links
// ============================================================================

/// Hypermedia link embedded in list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation of the link to the current document (e.g. "next")
    pub rel: String,
    /// Absolute or relative URL
    pub href: String,
}

// ============================================================================
// Timestamps
// ============================================================================

/// Serde helpers for API timestamps.
///
/// The API is inconsistent: some fields are RFC 3339, others carry no zone
/// (`2020-01-01T10:00:00`) or a numeric offset without colon (`+0000`).
/// Zone-less values are taken as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NO_ZONE: &str = "%Y-%m-%dT%H:%M:%S%.f";
    const NO_ZONE_SPACE: &str = "%Y-%m-%d %H:%M:%S%.f";
    const NUMERIC_ZONE: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

    /// Parse any of the timestamp layouts the API emits
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, NUMERIC_ZONE) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, NO_ZONE)
            .or_else(|_| NaiveDateTime::parse_from_str(s, NO_ZONE_SPACE))
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    /// Same as the parent module, for optional (nullable) fields
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
            }
        }
    }
}
