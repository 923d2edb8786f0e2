//! User role assignments
//!
//! `/v1/users/assignments`: list (offset pages), assign, update, unassign.

mod requests;
mod types;

pub use requests::{assign, list, unassign, update};
pub use types::{AssignOpts, ListOpts, RoleAssignment, UserRole};
