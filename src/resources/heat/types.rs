//! Stack resource types and options

use crate::error::{Error, Result};
use crate::http::{QueryBuilder, ToQuery, ToRequestBody};
use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One resource of a stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_name: String,
    pub resource_type: String,
    pub resource_status: String,
    #[serde(default)]
    pub resource_status_reason: Option<String>,
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub required_by: Vec<String>,
    #[serde(with = "timestamp")]
    pub creation_time: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// Filters for listing stack resources
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    /// Include resources of nested stacks down to this depth
    pub nested_depth: Option<u32>,
    pub with_detail: bool,
    pub resource_type: Option<String>,
    pub resource_status: Option<String>,
    pub resource_name: Option<String>,
}

impl ToQuery for ListOpts {
    fn to_query(&self) -> Result<Vec<(String, String)>> {
        Ok(QueryBuilder::new()
            .push_opt("nested_depth", self.nested_depth)
            .push_flag("with_detail", self.with_detail)
            .push_opt("type", self.resource_type.as_deref())
            .push_opt("status", self.resource_status.as_deref())
            .push_opt("name", self.resource_name.as_deref())
            .build())
    }
}

/// Body for marking a resource unhealthy (or clearing the mark)
#[derive(Debug, Clone, Serialize)]
pub struct MarkUnhealthyOpts {
    pub mark_unhealthy: bool,
    pub resource_status_reason: String,
}

impl ToRequestBody for MarkUnhealthyOpts {
    fn to_body(&self) -> Result<Value> {
        if self.mark_unhealthy && self.resource_status_reason.trim().is_empty() {
            return Err(Error::validation(
                "resource_status_reason",
                "required when marking a resource unhealthy",
            ));
        }
        Ok(serde_json::to_value(self)?)
    }
}
