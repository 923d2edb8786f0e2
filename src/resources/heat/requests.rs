//! Stack resource requests

use super::types::{ListOpts, MarkUnhealthyOpts, Resource};
use crate::error::Result;
use crate::http::{RequestOpts, ServiceClient, ToQuery, ToRequestBody};
use crate::pagination::Pager;
use crate::resources::require_non_empty;
use crate::types::JsonObject;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

fn resources_url(client: &ServiceClient, stack_id: &str, extra: &[&str]) -> Result<String> {
    require_non_empty("stack_id", stack_id)?;
    let mut segments = vec!["stacks", stack_id, "resources"];
    segments.extend_from_slice(extra);
    client.regional_url("v1", "heat", &segments)
}

/// List the resources of a stack
pub async fn list(client: &ServiceClient, stack_id: &str, opts: &ListOpts) -> Result<Vec<Resource>> {
    let query = opts.to_query()?;
    Pager::single(client, &resources_url(client, stack_id, &[])?)?
        .with_query(query)
        .extract_all()
        .await
}

/// Get one resource by its logical name
pub async fn get(client: &ServiceClient, stack_id: &str, name: &str) -> Result<Resource> {
    require_non_empty("resource_name", name)?;
    client
        .get_json(&resources_url(client, stack_id, &[name])?, RequestOpts::new())
        .await
}

/// Metadata attached to a resource
pub async fn metadata(client: &ServiceClient, stack_id: &str, name: &str) -> Result<JsonObject> {
    require_non_empty("resource_name", name)?;
    let url = resources_url(client, stack_id, &[name, "metadata"])?;
    client.get_json(&url, RequestOpts::new()).await
}

/// Send a signal with an arbitrary JSON payload to a resource
pub async fn signal(client: &ServiceClient, stack_id: &str, name: &str, payload: Value) -> Result<()> {
    require_non_empty("resource_name", name)?;
    let url = resources_url(client, stack_id, &[name, "signal"])?;
    debug!("Signalling resource {name} of stack {stack_id}");
    client
        .request(
            Method::POST,
            &url,
            RequestOpts::new().json(payload).ok_codes(&[200, 202, 204]),
        )
        .await?;
    Ok(())
}

/// Mark a resource unhealthy so that the next stack update replaces it
pub async fn mark_unhealthy(
    client: &ServiceClient,
    stack_id: &str,
    name: &str,
    opts: &MarkUnhealthyOpts,
) -> Result<()> {
    require_non_empty("resource_name", name)?;
    let body = opts.to_body()?;
    let url = resources_url(client, stack_id, &[name])?;
    client
        .request(Method::PATCH, &url, RequestOpts::new().json(body))
        .await?;
    Ok(())
}
