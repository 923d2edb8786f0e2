// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # gcloud-client
//!
//! Client library and CLI for a cloud provider's REST control plane.
//!
//! ## Features
//!
//! - **Authenticated client**: bearer or API-key auth, one refresh-or-login
//!   and retry when a request comes back 401
//! - **Pagination**: linked (`links[rel=next]`) and `limit`/`offset` pages,
//!   as a callback loop, a combined page or a `Stream`
//! - **Resources**: projects, API tokens, quotas, bare-metal capacity,
//!   inference flavors and registry credentials, orchestration resources,
//!   role assignments, tasks
//! - **Profiles**: YAML config file overridden by flags and environment
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gcloud_client::auth::AuthConfig;
//! use gcloud_client::http::{ClientConfig, ServiceClient};
//! use gcloud_client::resources::projects;
//!
//! #[tokio::main]
//! async fn main() -> gcloud_client::Result<()> {
//!     let config = ClientConfig::builder()
//!         .api_url("https://api.example.com/cloud")
//!         .project(1)
//!         .region(76)
//!         .build();
//!     let auth = AuthConfig::password("https://api.example.com/iam", "user", "secret");
//!     let client = ServiceClient::new(config, auth)?;
//!
//!     for project in projects::list(&client, &projects::ListOpts::default()).await? {
//!         println!("{} {}", project.id, project.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       CLI (clap)                             │
//! │   gcloud <resource> <list|show|create|update|delete>         │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │ projects │ apitokens │ quotas │ inference │ heat │ users │ … │
//! └──────────────┬──────────────────────────────┬────────────────┘
//!                │                              │
//!        ┌───────┴────────┐            ┌────────┴────────┐
//!        │     Pager      │───────────▶│  ServiceClient  │
//!        │ linked/offset  │            │ 401 → reauth →  │
//!        └────────────────┘            │   retry once    │
//!                                      └─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Token state and reauthentication
pub mod auth;

/// Authenticated HTTP client with rate limiting
pub mod http;

/// Linked and offset pagination
pub mod pagination;

/// Resource clients
pub mod resources;

/// Profile configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use auth::AuthConfig;
pub use config::Profile;
pub use http::{ClientConfig, ServiceClient};
pub use pagination::{Page, Pager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
