//! Task requests

use super::types::{Task, TaskState};
use crate::error::{Error, Result};
use crate::http::{RequestOpts, ServiceClient};
use crate::resources::PollOpts;
use tracing::info;

fn task_url(client: &ServiceClient, task_id: &str) -> String {
    client.url(&["v1", "tasks", task_id])
}

/// Get a task by ID
pub async fn get(client: &ServiceClient, task_id: &str) -> Result<Task> {
    client
        .get_json(&task_url(client, task_id), RequestOpts::new())
        .await
}

/// Poll a task until it finishes.
///
/// A task ending in ERROR and a task still running after the last poll
/// are both reported as `Error::Task`.
pub async fn wait_for_task(client: &ServiceClient, task_id: &str, poll: &PollOpts) -> Result<Task> {
    for attempt in 1..=poll.max_attempts {
        let task = get(client, task_id).await?;
        match task.state {
            TaskState::Finished => return Ok(task),
            TaskState::Error => {
                let message = task
                    .error
                    .clone()
                    .unwrap_or_else(|| "task finished with ERROR state".to_string());
                return Err(Error::task(task_id, message));
            }
            state => {
                info!(
                    "Task {task_id} is {state}, attempt {attempt}/{}",
                    poll.max_attempts
                );
            }
        }
        if attempt < poll.max_attempts {
            tokio::time::sleep(poll.interval).await;
        }
    }
    Err(Error::task(
        task_id,
        format!("not finished after {} polls", poll.max_attempts),
    ))
}
