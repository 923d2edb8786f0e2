//! API token requests

use super::types::{ApiToken, CreateOpts, ListOpts, TokenCreated};
use crate::error::Result;
use crate::http::{RequestOpts, ServiceClient, ToQuery, ToRequestBody};
use crate::pagination::Pager;
use reqwest::Method;

fn root_url(client: &ServiceClient, client_id: u64) -> String {
    client.url(&["iam", "clients", &client_id.to_string(), "tokens"])
}

fn resource_url(client: &ServiceClient, client_id: u64, token_id: u64) -> String {
    client.url(&[
        "iam",
        "clients",
        &client_id.to_string(),
        "tokens",
        &token_id.to_string(),
    ])
}

/// List tokens of a client account
pub async fn list(client: &ServiceClient, client_id: u64, opts: &ListOpts) -> Result<Vec<ApiToken>> {
    let query = opts.to_query()?;
    Pager::single(client, &root_url(client, client_id))?
        .with_query(query)
        .extract_all()
        .await
}

/// Get one token
pub async fn get(client: &ServiceClient, client_id: u64, token_id: u64) -> Result<ApiToken> {
    client
        .get_json(&resource_url(client, client_id, token_id), RequestOpts::new())
        .await
}

/// Create a token; the returned secret cannot be read again
pub async fn create(client: &ServiceClient, client_id: u64, opts: &CreateOpts) -> Result<TokenCreated> {
    let body = opts.to_body()?;
    client
        .request_json(
            Method::POST,
            &root_url(client, client_id),
            RequestOpts::new().json(body),
        )
        .await
}

/// Revoke a token
pub async fn delete(client: &ServiceClient, client_id: u64, token_id: u64) -> Result<()> {
    client
        .request(
            Method::DELETE,
            &resource_url(client, client_id, token_id),
            RequestOpts::new().ok_codes(&[204]),
        )
        .await?;
    Ok(())
}
