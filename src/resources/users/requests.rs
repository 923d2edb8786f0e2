//! Role assignment requests

use super::types::{AssignOpts, ListOpts, RoleAssignment};
use crate::error::Result;
use crate::http::{RequestOpts, ServiceClient, ToQuery, ToRequestBody};
use crate::pagination::Pager;
use reqwest::Method;

fn root_url(client: &ServiceClient) -> String {
    client.url(&["v1", "users", "assignments"])
}

fn resource_url(client: &ServiceClient, id: u64) -> String {
    client.url(&["v1", "users", "assignments", &id.to_string()])
}

/// List role assignments
pub async fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Vec<RoleAssignment>> {
    let query = opts.to_query()?;
    Pager::offset(client, &root_url(client))?
        .with_query(query)
        .extract_all()
        .await
}

/// Grant a role
pub async fn assign(client: &ServiceClient, opts: &AssignOpts) -> Result<RoleAssignment> {
    let body = opts.to_body()?;
    client
        .request_json(Method::POST, &root_url(client), RequestOpts::new().json(body))
        .await
}

/// Replace an existing assignment
pub async fn update(client: &ServiceClient, id: u64, opts: &AssignOpts) -> Result<RoleAssignment> {
    let body = opts.to_body()?;
    client
        .request_json(
            Method::PUT,
            &resource_url(client, id),
            RequestOpts::new().json(body),
        )
        .await
}

/// Revoke an assignment
pub async fn unassign(client: &ServiceClient, id: u64) -> Result<()> {
    client.delete(&resource_url(client, id)).await
}
