//! Inference platform
//!
//! - `/v3/inference/flavors`: hardware flavors for inference deployments
//! - `/v3/inference/{project}/registry_credentials`: private registry logins

pub mod credentials;
pub mod flavors;

pub use credentials::{Credential, CreateCredentialOpts, UpdateCredentialOpts};
pub use flavors::Flavor;

#[cfg(test)]
mod tests;
