//! Permanent API tokens
//!
//! `/iam/clients/{client_id}/tokens`: list, get, create, delete.

mod requests;
mod types;

pub use requests::{create, delete, get, list};
pub use types::{
    ApiToken, ClientUser, CreateOpts, ListOpts, TokenCreated, TokenRole, TokenRoleId,
};

#[cfg(test)]
mod tests;
