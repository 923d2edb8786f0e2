//! Quota types and options

use crate::error::{Error, Result};
use crate::http::ToRequestBody;
use crate::resources::require_non_empty;
use crate::resources::validate::one_of;
use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named limits/usages, e.g. `cpu_count_limit: 10, cpu_count_usage: 2`
pub type Quota = BTreeMap<String, i64>;

/// Quota of one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalQuota {
    pub region_id: u64,
    #[serde(flatten)]
    pub limits: Quota,
}

/// Global and per-region quotas of a client
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombinedQuota {
    #[serde(default)]
    pub global_quotas: Quota,
    #[serde(default)]
    pub regional_quotas: Vec<RegionalQuota>,
}

/// Review state of an increase request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitRequestStatus {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
    #[serde(rename = "rejected")]
    Rejected,
}

impl LimitRequestStatus {
    pub fn list() -> &'static [LimitRequestStatus] {
        &[Self::InProgress, Self::Done, Self::Rejected]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Done => "done",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LimitRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LimitRequestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::list()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::validation("status", one_of(Self::list())))
    }
}

/// Limits asked for in an increase request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestedLimits {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub global_limits: Quota,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regional_limits: Vec<RegionalQuota>,
}

impl RequestedLimits {
    pub fn is_empty(&self) -> bool {
        self.global_limits.is_empty() && self.regional_limits.iter().all(|r| r.limits.is_empty())
    }
}

/// A quota increase request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitRequest {
    pub id: u64,
    pub client_id: u64,
    pub requested_limits: RequestedLimits,
    pub status: LimitRequestStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body for a new increase request
#[derive(Debug, Clone, Serialize)]
pub struct CreateLimitRequestOpts {
    pub description: String,
    pub requested_limits: RequestedLimits,
}

impl ToRequestBody for CreateLimitRequestOpts {
    fn to_body(&self) -> Result<Value> {
        require_non_empty("description", &self.description)?;
        if self.requested_limits.is_empty() {
            return Err(Error::validation(
                "requested_limits",
                "at least one limit is required",
            ));
        }
        let all_limits = self.requested_limits.global_limits.iter().chain(
            self.requested_limits
                .regional_limits
                .iter()
                .flat_map(|r| r.limits.iter()),
        );
        for (name, value) in all_limits {
            if *value < 0 {
                return Err(Error::validation(name, "limit must not be negative"));
            }
        }
        Ok(serde_json::to_value(self)?)
    }
}
