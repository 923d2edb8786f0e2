//! Project requests

use super::types::{CreateOpts, ListOpts, Project, UpdateOpts};
use crate::error::{Error, Result};
use crate::http::{RequestOpts, ServiceClient, ToQuery, ToRequestBody};
use crate::pagination::Pager;
use crate::resources::{tasks, PollOpts};
use crate::types::TaskResults;
use reqwest::Method;
use tracing::info;

fn root_url(client: &ServiceClient) -> String {
    client.url(&["v1", "projects"])
}

fn resource_url(client: &ServiceClient, id: u64) -> String {
    client.url(&["v1", "projects", &id.to_string()])
}

/// List projects visible to the caller
pub async fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Vec<Project>> {
    let query = opts.to_query()?;
    Pager::linked(client, &root_url(client))?
        .with_query(query)
        .extract_all()
        .await
}

/// Get a project by ID
pub async fn get(client: &ServiceClient, id: u64) -> Result<Project> {
    client
        .get_json(&resource_url(client, id), RequestOpts::new())
        .await
}

/// Create a project
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Project> {
    let body = opts.to_body()?;
    client
        .request_json(Method::POST, &root_url(client), RequestOpts::new().json(body))
        .await
}

/// Update a project's name and description
pub async fn update(client: &ServiceClient, id: u64, opts: &UpdateOpts) -> Result<Project> {
    let body = opts.to_body()?;
    client
        .request_json(
            Method::PUT,
            &resource_url(client, id),
            RequestOpts::new().json(body),
        )
        .await
}

/// Delete a project; deletion continues in the background
pub async fn delete(client: &ServiceClient, id: u64) -> Result<TaskResults> {
    client.delete_json(&resource_url(client, id)).await
}

/// Delete a project and wait until it is gone.
///
/// When the delete starts a task, that task is awaited first and the
/// project is then looked up once: a 404 means success, a project that is
/// still found is `Error::CannotDelete`. Without a task the project is
/// polled until it disappears or the poll budget runs out. Any other error
/// (including a task ending in ERROR) is returned as-is.
pub async fn delete_and_wait(client: &ServiceClient, id: u64, poll: &PollOpts) -> Result<()> {
    let started = delete(client, id).await?;

    if let Some(task_id) = started.first() {
        tasks::wait_for_task(client, task_id, poll).await?;
        return match get(client, id).await {
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
            Ok(project) => {
                info!("Project {id} still {} after task {task_id} finished", project.state);
                Err(cannot_delete(id))
            }
        };
    }

    for attempt in 1..=poll.max_attempts {
        tokio::time::sleep(poll.interval).await;
        match get(client, id).await {
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e),
            Ok(project) => info!(
                "Project {id} still {}, attempt {attempt}/{}",
                project.state, poll.max_attempts
            ),
        }
    }

    Err(cannot_delete(id))
}

fn cannot_delete(id: u64) -> Error {
    Error::CannotDelete {
        resource: "project".to_string(),
        id: id.to_string(),
    }
}
