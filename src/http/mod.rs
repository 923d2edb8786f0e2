//! HTTP client module
//!
//! Provides the authenticated service client every resource module calls.
//!
//! # Features
//!
//! - **Reauthentication**: one refresh-or-login and retry on 401
//! - **Status checking**: per-operation accepted status codes
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Options**: `ToQuery` / `ToRequestBody` traits for option structs

mod client;
mod options;
mod rate_limit;

pub use client::{
    decode_json, default_ok_codes, ClientConfig, ClientConfigBuilder, RequestOpts, ServiceClient,
};
pub use options::{QueryBuilder, ToQuery, ToRequestBody};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
