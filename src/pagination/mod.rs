//! Pagination module
//!
//! Supports: linked pages (`links[rel=next]` in the body) and offset pages
//! (`limit`/`offset` query parameters).
//!
//! # Overview
//!
//! A `Pager` fetches one page at a time through the service client and asks
//! its strategy where the next page lives. An empty page always ends
//! iteration; it is a normal end-of-sequence, not an error.

mod pager;
mod strategies;
mod types;

pub use pager::Pager;
pub use strategies::{LinkedPaginator, OffsetPaginator, SinglePagePaginator};
pub use types::{NextPage, Page, Paginator};

#[cfg(test)]
mod tests;
