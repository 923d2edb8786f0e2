//! Pagination types and traits
//!
//! Defines the page abstraction and the strategy trait used by the pager.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available at this URL
    Continue(Url),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Next URL, if any
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Continue(url) => Some(url),
            Self::Done => None,
        }
    }
}

/// One fetched page of a collection
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    body: Value,
    results_key: String,
}

impl Page {
    /// Wrap a decoded body fetched from `url`
    pub fn new(url: Url, body: Value, results_key: impl Into<String>) -> Self {
        Self {
            url,
            body,
            results_key: results_key.into(),
        }
    }

    /// URL this page was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw decoded body
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Items of the page: the body itself when it is an array, otherwise
    /// the array under the results key.
    pub fn results(&self) -> &[Value] {
        let items = match &self.body {
            Value::Array(_) => Some(&self.body),
            Value::Object(map) => map.get(&self.results_key),
            _ => None,
        };
        items
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.results().len()
    }

    /// A successfully fetched page with no items ends iteration
    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }

    /// `count` field reported by the server, if present. Informational
    /// only: iteration never stops on it.
    pub fn count(&self) -> Option<u64> {
        self.body.get("count").and_then(Value::as_u64)
    }

    /// Decode the items into a caller-supplied shape
    pub fn extract<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.results()
            .iter()
            .map(|item| {
                T::deserialize(item)
                    .map_err(|e| Error::decode(format!("{}: {e}", self.url)))
            })
            .collect()
    }

    /// Combine pages into one, concatenating their items in order
    pub fn concat(url: Url, results_key: &str, pages: Vec<Page>) -> Self {
        let items: Vec<Value> = pages
            .into_iter()
            .flat_map(|page| page.results().to_vec())
            .collect();
        let mut body = serde_json::Map::new();
        body.insert("count".to_string(), json!(items.len()));
        body.insert(results_key.to_string(), Value::Array(items));
        Self::new(url, Value::Object(body), results_key)
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// URL of the first request. Strategies that need paging parameters
    /// on every request fill them in here.
    fn first_page(&self, url: &Url) -> Url {
        url.clone()
    }

    /// Given the page just fetched, work out where the next one lives
    fn next_page(&self, page: &Page) -> Result<NextPage>;
}
