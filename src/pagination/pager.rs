//! Pager: drives a strategy against a collection endpoint

use super::strategies::{LinkedPaginator, OffsetPaginator, SinglePagePaginator};
use super::types::{NextPage, Page, Paginator};
use crate::error::{Error, Result};
use crate::http::{RequestOpts, ServiceClient};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

const DEFAULT_RESULTS_KEY: &str = "results";

/// Iterates a collection endpoint one page at a time.
///
/// Restartable per call: each `each_page`/`all_pages` starts again from the
/// initial URL. The state carried between fetches is the next locator and
/// the set of URLs already fetched.
pub struct Pager<'a> {
    client: &'a ServiceClient,
    initial: Url,
    paginator: Box<dyn Paginator>,
    results_key: String,
}

impl<'a> Pager<'a> {
    /// Create a pager over `url` using the given strategy
    pub fn new(
        client: &'a ServiceClient,
        url: &str,
        paginator: impl Paginator + 'static,
    ) -> Result<Self> {
        Ok(Self {
            client,
            initial: Url::parse(url)?,
            paginator: Box::new(paginator),
            results_key: DEFAULT_RESULTS_KEY.to_string(),
        })
    }

    /// Pager following `links[rel=next]`
    pub fn linked(client: &'a ServiceClient, url: &str) -> Result<Self> {
        Self::new(client, url, LinkedPaginator::default())
    }

    /// Pager advancing `offset` by `limit`
    pub fn offset(client: &'a ServiceClient, url: &str) -> Result<Self> {
        Self::new(client, url, OffsetPaginator::default())
    }

    /// Pager for endpoints that return everything at once
    pub fn single(client: &'a ServiceClient, url: &str) -> Result<Self> {
        Self::new(client, url, SinglePagePaginator)
    }

    /// Append query parameters to the initial URL
    #[must_use]
    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        if !pairs.is_empty() {
            self.initial.query_pairs_mut().extend_pairs(pairs);
        }
        self
    }

    /// Use a different key for the items array (default: "results")
    #[must_use]
    pub fn with_results_key(mut self, key: impl Into<String>) -> Self {
        self.results_key = key.into();
        self
    }

    /// Initial URL, including query
    pub fn url(&self) -> &Url {
        &self.initial
    }

    async fn fetch(&self, url: &Url) -> Result<Page> {
        debug!("Fetching page {url}");
        let body: Value = self
            .client
            .get_json(url.as_str(), RequestOpts::new())
            .await?;
        Ok(Page::new(url.clone(), body, self.results_key.as_str()))
    }

    /// Fetch pages in order, handing each non-empty one to `visit`.
    ///
    /// Stops when `visit` returns `Ok(false)`, when there is no next page,
    /// or on the first empty page. An ill-formed next locator only fails the
    /// iteration when `visit` asks for more. A next URL already fetched during
    /// this iteration is a `Decode` error. Errors from the fetch or from
    /// `visit` are returned as-is.
    pub async fn each_page<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(Page) -> Result<bool>,
    {
        let mut seen = HashSet::new();
        let mut next = Some(self.paginator.first_page(&self.initial));
        while let Some(url) = next.take() {
            check_unvisited(&mut seen, &url)?;
            let page = self.fetch(&url).await?;
            if page.is_empty() {
                break;
            }
            // computed before `page` moves into `visit`, surfaced only after
            let after = self.paginator.next_page(&page);
            if !visit(page)? {
                break;
            }
            if let NextPage::Continue(url) = after? {
                next = Some(url);
            }
        }
        Ok(())
    }

    /// Drain every page into one combined page
    pub async fn all_pages(&self) -> Result<Page> {
        let mut pages = Vec::new();
        self.each_page(|page| {
            pages.push(page);
            Ok(true)
        })
        .await?;
        Ok(Page::concat(
            self.initial.clone(),
            &self.results_key,
            pages,
        ))
    }

    /// Drain every page and decode all items
    pub async fn extract_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.all_pages().await?.extract()
    }

    /// The same iteration as `each_page`, as a stream. A page is yielded
    /// before its next locator can fail the stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> + 'a {
        let start = Ok(Some(self.paginator.first_page(&self.initial)));
        stream::try_unfold(
            (self, start, HashSet::new()),
            |(pager, next, mut seen)| async move {
                let Some(url) = next? else {
                    return Ok(None);
                };
                check_unvisited(&mut seen, &url)?;
                let page = pager.fetch(&url).await?;
                if page.is_empty() {
                    return Ok(None);
                }
                let after = pager
                    .paginator
                    .next_page(&page)
                    .map(|next| next.url().cloned());
                Ok(Some((page, (pager, after, seen))))
            },
        )
    }
}

fn check_unvisited(seen: &mut HashSet<Url>, url: &Url) -> Result<()> {
    if seen.insert(url.clone()) {
        Ok(())
    } else {
        Err(Error::decode(format!("Pagination cycle: {url} already visited")))
    }
}

impl std::fmt::Debug for Pager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("initial", &self.initial.as_str())
            .field("results_key", &self.results_key)
            .finish_non_exhaustive()
    }
}
