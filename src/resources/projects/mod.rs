//! Projects
//!
//! `/v1/projects`: list (linked pages), get, create, update, delete, and
//! delete-then-wait until the project is gone.

mod requests;
mod types;

pub use requests::{create, delete, delete_and_wait, get, list, update};
pub use types::{CreateOpts, ListOpts, Project, ProjectState, UpdateOpts};
