//! Orchestration (Heat) stack resources
//!
//! `/v1/heat/{project}/{region}/stacks/{stack_id}/resources`: list, get,
//! metadata, signal and mark-unhealthy.

mod requests;
mod types;

pub use requests::{get, list, mark_unhealthy, metadata, signal};
pub use types::{ListOpts, MarkUnhealthyOpts, Resource};
