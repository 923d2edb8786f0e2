//! API token types and options

use crate::error::{Error, Result};
use crate::http::{QueryBuilder, ToQuery, ToRequestBody};
use crate::resources::require_non_empty;
use crate::resources::validate::one_of;
use crate::types::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Role a token acts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum TokenRoleId {
    Administrators,
    Users,
    Engineers,
    PurgeAndPrefetchApi,
    PurgeAndPrefetchApiWeb,
}

impl TokenRoleId {
    /// Every valid role, in canonical order
    pub fn list() -> &'static [TokenRoleId] {
        &[
            Self::Administrators,
            Self::Users,
            Self::Engineers,
            Self::PurgeAndPrefetchApi,
            Self::PurgeAndPrefetchApiWeb,
        ]
    }

    pub fn id(self) -> u64 {
        match self {
            Self::Administrators => 1,
            Self::Users => 2,
            Self::Engineers => 3,
            Self::PurgeAndPrefetchApi => 5,
            Self::PurgeAndPrefetchApiWeb => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Administrators => "Administrators",
            Self::Users => "Users",
            Self::Engineers => "Engineers",
            Self::PurgeAndPrefetchApi => "Purge and Prefetch only (API)",
            Self::PurgeAndPrefetchApiWeb => "Purge and Prefetch only (API+Web)",
        }
    }
}

impl fmt::Display for TokenRoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.name())
    }
}

impl TryFrom<u64> for TokenRoleId {
    type Error = Error;

    fn try_from(id: u64) -> Result<Self> {
        Self::list()
            .iter()
            .copied()
            .find(|role| role.id() == id)
            .ok_or_else(|| Error::validation("role_id", one_of(Self::list())))
    }
}

impl From<TokenRoleId> for u64 {
    fn from(role: TokenRoleId) -> Self {
        role.id()
    }
}

/// Role as reported on a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRole {
    pub id: TokenRoleId,
    pub name: String,
}

/// User that issued a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUser {
    pub role: TokenRole,
    pub deleted: bool,
    pub user_id: u64,
    pub user_name: String,
    pub user_email: String,
    pub client_id: u64,
}

/// A permanent API token (the secret itself is only returned on create)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiToken {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub exp_date: Option<DateTime<Utc>>,
    pub client_user: ClientUser,
    pub deleted: bool,
    pub expired: bool,
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub last_usage: Option<DateTime<Utc>>,
}

/// Body returned by create: the only time the secret is visible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCreated {
    pub token: String,
}

/// Filters for listing tokens
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    pub role_id: Option<TokenRoleId>,
    pub issued_by: Option<u64>,
    pub not_issued_by: Option<u64>,
    pub deleted: bool,
}

impl ToQuery for ListOpts {
    fn to_query(&self) -> Result<Vec<(String, String)>> {
        if let (Some(by), Some(not_by)) = (self.issued_by, self.not_issued_by) {
            if by == not_by {
                return Err(Error::validation(
                    "not_issued_by",
                    "cannot equal issued_by",
                ));
            }
        }
        Ok(QueryBuilder::new()
            .push_opt("role", self.role_id.map(TokenRoleId::id))
            .push_opt("issued_by", self.issued_by)
            .push_opt("not_issued_by", self.not_issued_by)
            .push_flag("deleted", self.deleted)
            .build())
    }
}

/// Body for creating a token
#[derive(Debug, Clone)]
pub struct CreateOpts {
    pub name: String,
    pub description: Option<String>,
    pub role_id: TokenRoleId,
    /// `None` creates a token that never expires
    pub exp_date: Option<DateTime<Utc>>,
}

impl ToRequestBody for CreateOpts {
    fn to_body(&self) -> Result<Value> {
        require_non_empty("name", &self.name)?;
        if let Some(exp) = self.exp_date {
            if exp <= Utc::now() {
                return Err(Error::validation("exp_date", "must be in the future"));
            }
        }

        let mut body = json!({
            "name": self.name,
            "client_user": {"role": {"id": self.role_id.id()}},
            "exp_date": self.exp_date.map(|d| d.to_rfc3339()),
        });
        if let Some(description) = &self.description {
            body["description"] = json!(description);
        }
        Ok(body)
    }
}
