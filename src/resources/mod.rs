//! Resource clients
//!
//! One module per REST collection. Each exposes option structs
//! (`ToQuery` / `ToRequestBody`), typed results, and async request
//! functions of the shape `op(client, ids..., &opts) -> Result<T>`.

mod validate;

pub mod apitokens;
pub mod bmcapacity;
pub mod heat;
pub mod inference;
pub mod projects;
pub mod quotas;
pub mod tasks;
pub mod users;

pub use validate::{require_non_empty, validate_name, PollOpts};
