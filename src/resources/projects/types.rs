//! Project types and options

use crate::error::{Error, Result};
use crate::http::{QueryBuilder, ToQuery, ToRequestBody};
use crate::resources::require_non_empty;
use crate::resources::validate::one_of;
use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Project lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectState {
    Active,
    Deleted,
    Deleting,
}

impl ProjectState {
    /// Every valid state, in canonical order
    pub fn list() -> &'static [ProjectState] {
        &[Self::Active, Self::Deleted, Self::Deleting]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Deleted => "DELETED",
            Self::Deleting => "DELETING",
        }
    }
}

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::list()
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::validation("state", one_of(Self::list())))
    }
}

/// A project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub client_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: ProjectState,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_default: bool,
}

/// Filters for listing projects
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    pub client_id: Option<u64>,
    pub name: Option<String>,
    pub include_deleted: bool,
    pub order_by: Option<String>,
}

impl ToQuery for ListOpts {
    fn to_query(&self) -> Result<Vec<(String, String)>> {
        Ok(QueryBuilder::new()
            .push_opt("client_id", self.client_id)
            .push_opt("name", self.name.as_deref())
            .push_flag("include_deleted", self.include_deleted)
            .push_opt("order_by", self.order_by.as_deref())
            .build())
    }
}

/// Body for creating a project
#[derive(Debug, Clone, Serialize)]
pub struct CreateOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ProjectState>,
}

impl CreateOpts {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            client_id: None,
            name: name.into(),
            description: None,
            state: None,
        }
    }
}

impl ToRequestBody for CreateOpts {
    fn to_body(&self) -> Result<Value> {
        require_non_empty("name", &self.name)?;
        if let Some(state) = self.state {
            if state != ProjectState::Active {
                return Err(Error::validation(
                    "state",
                    "new projects can only be created ACTIVE",
                ));
            }
        }
        Ok(serde_json::to_value(self)?)
    }
}

/// Body for updating a project
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOpts {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ToRequestBody for UpdateOpts {
    fn to_body(&self) -> Result<Value> {
        require_non_empty("name", &self.name)?;
        Ok(serde_json::to_value(self)?)
    }
}
