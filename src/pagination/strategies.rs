//! Pagination strategy implementations

use super::types::{NextPage, Page, Paginator};
use crate::error::{Error, Result};
use crate::types::Link;
use serde_json::Value;
use url::Url;

// ============================================================================
// Linked Pagination
// ============================================================================

/// Linked pagination: the next URL is embedded in the body.
///
/// Format: `{"results": [...], "links": [{"rel": "next", "href": "..."}]}`.
/// Relative hrefs are resolved against the URL of the current page.
#[derive(Debug, Clone)]
pub struct LinkedPaginator {
    /// Rel value to follow (default: "next")
    pub rel: String,
}

impl Default for LinkedPaginator {
    fn default() -> Self {
        Self {
            rel: "next".to_string(),
        }
    }
}

impl Paginator for LinkedPaginator {
    fn next_page(&self, page: &Page) -> Result<NextPage> {
        let Some(links) = page.body().get("links").and_then(Value::as_array) else {
            return Ok(NextPage::Done);
        };

        let next = links
            .iter()
            .filter_map(|link| serde_json::from_value::<Link>(link.clone()).ok())
            .find(|link| link.rel == self.rel);

        let Some(link) = next else {
            return Ok(NextPage::Done);
        };
        if link.href.is_empty() {
            return Ok(NextPage::Done);
        }

        let url = page.url().join(&link.href).map_err(|e| {
            Error::decode(format!("Malformed next link '{}': {e}", link.href))
        })?;

        // A next link pointing at the current page would loop forever
        if &url == page.url() {
            return Ok(NextPage::Done);
        }
        Ok(NextPage::Continue(url))
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination: `?limit=N&offset=M`.
///
/// The first request always carries both parameters (the default limit and
/// offset 0 are filled in when missing), so the step taken between pages is
/// the page size the server was asked for. The next offset is the current
/// offset plus that limit. Iteration ends on the first empty page, never on a total count, so a
/// collection that shrinks or grows between fetches may be under- or
/// over-read.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Page size requested when the URL carries no limit
    pub default_limit: u64,
}

impl Default for OffsetPaginator {
    fn default() -> Self {
        Self {
            offset_param: "offset".to_string(),
            limit_param: "limit".to_string(),
            default_limit: 1000,
        }
    }
}

impl OffsetPaginator {
    fn query_u64(&self, page: &Page, key: &str) -> Option<u64> {
        page.url()
            .query_pairs()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.parse().ok())
    }
}

impl Paginator for OffsetPaginator {
    fn first_page(&self, url: &Url) -> Url {
        let has = |key: &str| url.query_pairs().any(|(k, _)| k == key);
        let (has_limit, has_offset) = (has(&self.limit_param), has(&self.offset_param));

        let mut first = url.clone();
        if !has_limit || !has_offset {
            let mut pairs = first.query_pairs_mut();
            if !has_limit {
                pairs.append_pair(&self.limit_param, &self.default_limit.to_string());
            }
            if !has_offset {
                pairs.append_pair(&self.offset_param, "0");
            }
        }
        first
    }

    fn next_page(&self, page: &Page) -> Result<NextPage> {
        if page.is_empty() {
            return Ok(NextPage::Done);
        }

        let offset = self.query_u64(page, &self.offset_param).unwrap_or(0);
        let limit = self
            .query_u64(page, &self.limit_param)
            .unwrap_or(self.default_limit);
        // limit=0 would never advance; step by what we actually received
        let step = if limit == 0 { page.len() as u64 } else { limit };

        let mut url = page.url().clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != &self.offset_param && k != &self.limit_param)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (k, v) in &kept {
                pairs.append_pair(k, v);
            }
            pairs.append_pair(&self.limit_param, &limit.to_string());
            pairs.append_pair(&self.offset_param, &(offset + step).to_string());
        }
        Ok(NextPage::Continue(url))
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct SinglePagePaginator;

impl Paginator for SinglePagePaginator {
    fn next_page(&self, _page: &Page) -> Result<NextPage> {
        Ok(NextPage::Done)
    }
}
