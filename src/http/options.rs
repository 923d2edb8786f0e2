//! Request option traits
//!
//! Resource option structs implement one of these to turn themselves into
//! a query string or a JSON body. Both run local validation first so that
//! an invalid option never reaches the network.

use crate::error::Result;
use serde_json::Value;

/// Anything convertible to list-query parameters
pub trait ToQuery {
    /// Validate and render query parameters
    fn to_query(&self) -> Result<Vec<(String, String)>>;
}

/// Anything convertible to a JSON request body
pub trait ToRequestBody {
    /// Validate and render the body
    fn to_body(&self) -> Result<Value>;
}

/// Small helper for building query pairs from optional fields
#[derive(Debug, Default)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key=value`
    #[must_use]
    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Add `key=value` when the value is present
    #[must_use]
    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Add `key=true` only when the flag is set
    #[must_use]
    pub fn push_flag(self, key: &str, flag: bool) -> Self {
        if flag {
            self.push(key, true)
        } else {
            self
        }
    }

    pub fn build(self) -> Vec<(String, String)> {
        self.pairs
    }
}
