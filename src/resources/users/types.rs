//! Role assignment types and options

use crate::error::{Error, Result};
use crate::http::{QueryBuilder, ToQuery, ToRequestBody};
use crate::resources::validate::one_of;
use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Role a user can hold in a client or project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    ClientAdministrator,
    InternalNetworkOnlyUser,
    Observer,
    ProjectAdministrator,
    User,
}

impl UserRole {
    pub fn list() -> &'static [UserRole] {
        &[
            Self::ClientAdministrator,
            Self::InternalNetworkOnlyUser,
            Self::Observer,
            Self::ProjectAdministrator,
            Self::User,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClientAdministrator => "ClientAdministrator",
            Self::InternalNetworkOnlyUser => "InternalNetworkOnlyUser",
            Self::Observer => "Observer",
            Self::ProjectAdministrator => "ProjectAdministrator",
            Self::User => "User",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::list()
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::validation("role", one_of(Self::list())))
    }
}

/// A role granted to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: u64,
    #[serde(default)]
    pub assigned_by: Option<u64>,
    pub client_id: u64,
    #[serde(default)]
    pub project_id: Option<u64>,
    pub role: UserRole,
    pub user_id: u64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing assignments
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    pub user_id: Option<u64>,
    pub project_id: Option<u64>,
}

impl ToQuery for ListOpts {
    fn to_query(&self) -> Result<Vec<(String, String)>> {
        Ok(QueryBuilder::new()
            .push_opt("user_id", self.user_id)
            .push_opt("project_id", self.project_id)
            .build())
    }
}

/// Body for assigning (or re-assigning) a role
#[derive(Debug, Clone, Serialize)]
pub struct AssignOpts {
    pub role: UserRole,
    pub user_id: u64,
    pub client_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
}

impl ToRequestBody for AssignOpts {
    fn to_body(&self) -> Result<Value> {
        match (self.role, self.project_id) {
            (UserRole::ProjectAdministrator, None) => {
                return Err(Error::validation(
                    "project_id",
                    "required for the ProjectAdministrator role",
                ));
            }
            (UserRole::ClientAdministrator, Some(_)) => {
                return Err(Error::validation(
                    "project_id",
                    "must not be set for the ClientAdministrator role",
                ));
            }
            _ => {}
        }
        Ok(serde_json::to_value(self)?)
    }
}
