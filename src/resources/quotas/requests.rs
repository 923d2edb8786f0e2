//! Quota requests

use super::types::{CombinedQuota, CreateLimitRequestOpts, LimitRequest, Quota};
use crate::error::Result;
use crate::http::{RequestOpts, ServiceClient, ToRequestBody};
use crate::pagination::Pager;
use reqwest::Method;

/// Global and regional quotas of a client in one call
pub async fn get_combined(client: &ServiceClient, client_id: u64) -> Result<CombinedQuota> {
    let url = client.url(&["v2", "client_quotas"]);
    client
        .get_json(&url, RequestOpts::new().query("client_id", client_id.to_string()))
        .await
}

/// Global quota of a client
pub async fn get_global(client: &ServiceClient, client_id: u64) -> Result<Quota> {
    let url = client.url(&["v2", "global_quotas", &client_id.to_string()]);
    client.get_json(&url, RequestOpts::new()).await
}

/// Quota of a client in one region
pub async fn get_regional(client: &ServiceClient, client_id: u64, region_id: u64) -> Result<Quota> {
    let url = client.url(&[
        "v2",
        "regional_quotas",
        &client_id.to_string(),
        &region_id.to_string(),
    ]);
    client.get_json(&url, RequestOpts::new()).await
}

fn limits_url(client: &ServiceClient, extra: Option<u64>) -> String {
    match extra {
        Some(id) => client.url(&["v2", "limits_request", &id.to_string()]),
        None => client.url(&["v2", "limits_request"]),
    }
}

/// List increase requests
pub async fn list_limit_requests(client: &ServiceClient) -> Result<Vec<LimitRequest>> {
    Pager::offset(client, &limits_url(client, None))?
        .extract_all()
        .await
}

/// Get one increase request
pub async fn get_limit_request(client: &ServiceClient, id: u64) -> Result<LimitRequest> {
    client
        .get_json(&limits_url(client, Some(id)), RequestOpts::new())
        .await
}

/// File an increase request
pub async fn create_limit_request(
    client: &ServiceClient,
    opts: &CreateLimitRequestOpts,
) -> Result<LimitRequest> {
    let body = opts.to_body()?;
    client
        .request_json(
            Method::POST,
            &limits_url(client, None),
            RequestOpts::new().json(body),
        )
        .await
}

/// Withdraw an increase request
pub async fn delete_limit_request(client: &ServiceClient, id: u64) -> Result<()> {
    client
        .request(
            Method::DELETE,
            &limits_url(client, Some(id)),
            RequestOpts::new().ok_codes(&[204]),
        )
        .await?;
    Ok(())
}
