//! Authentication module
//!
//! Supports: permanent API tokens and platform JWT (login + refresh).
//!
//! The `Authenticator` owns the token pair and knows how to obtain a new
//! one; the service client decides when to ask for it.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Credentials, TokenPair};
