//! Task types

use crate::error::{Error, Result};
use crate::resources::validate::one_of;
use crate::types::{timestamp, JsonObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    New,
    Running,
    Finished,
    Error,
}

impl TaskState {
    pub fn list() -> &'static [TaskState] {
        &[Self::New, Self::Running, Self::Finished, Self::Error]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Error => "ERROR",
        }
    }

    /// Whether polling can stop
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Error)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::list()
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::validation("state", one_of(Self::list())))
    }
}

/// A background task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub task_type: String,
    pub state: TaskState,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub created_resources: Option<JsonObject>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub region_id: Option<u64>,
    #[serde(default)]
    pub client_id: Option<u64>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(with = "timestamp")]
    pub created_on: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub finished_on: Option<DateTime<Utc>>,
}

impl Task {
    /// IDs of resources of `kind` the task created (e.g. "projects")
    pub fn created(&self, kind: &str) -> Vec<String> {
        self.created_resources
            .as_ref()
            .and_then(|resources| resources.get(kind))
            .and_then(serde_json::Value::as_array)
            .map(|ids| {
                ids.iter()
                    .map(|id| match id {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
