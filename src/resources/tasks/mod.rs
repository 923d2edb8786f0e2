//! Asynchronous tasks
//!
//! Create/delete operations on regional resources return task IDs; these
//! functions read a task and wait until it reaches a terminal state.

mod requests;
mod types;

pub use requests::{get, wait_for_task};
pub use types::{Task, TaskState};
