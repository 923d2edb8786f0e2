//! Registry credentials used to pull private inference images

use crate::error::Result;
use crate::http::{RequestOpts, ServiceClient, ToRequestBody};
use crate::pagination::Pager;
use crate::resources::{require_non_empty, validate_name};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stored registry credential (the password is never returned)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub name: String,
    pub username: String,
    pub registry_url: String,
    pub project_id: u64,
}

/// Body for creating a credential
#[derive(Clone, Serialize)]
pub struct CreateCredentialOpts {
    pub name: String,
    pub username: String,
    pub password: String,
    pub registry_url: String,
}

impl std::fmt::Debug for CreateCredentialOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateCredentialOpts")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("registry_url", &self.registry_url)
            .finish_non_exhaustive()
    }
}

impl ToRequestBody for CreateCredentialOpts {
    fn to_body(&self) -> Result<Value> {
        validate_name("name", &self.name)?;
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)?;
        require_non_empty("registry_url", &self.registry_url)?;
        Ok(serde_json::to_value(self)?)
    }
}

/// Body for replacing a credential's secret
#[derive(Clone, Serialize)]
pub struct UpdateCredentialOpts {
    pub username: String,
    pub password: String,
    pub registry_url: String,
}

impl std::fmt::Debug for UpdateCredentialOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateCredentialOpts")
            .field("username", &self.username)
            .field("registry_url", &self.registry_url)
            .finish_non_exhaustive()
    }
}

impl ToRequestBody for UpdateCredentialOpts {
    fn to_body(&self) -> Result<Value> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)?;
        require_non_empty("registry_url", &self.registry_url)?;
        Ok(serde_json::to_value(self)?)
    }
}

fn root_url(client: &ServiceClient) -> Result<String> {
    client.project_url("v3", "inference", &["registry_credentials"])
}

fn resource_url(client: &ServiceClient, name: &str) -> Result<String> {
    client.project_url("v3", "inference", &["registry_credentials", name])
}

/// List credentials of the configured project
pub async fn list(client: &ServiceClient) -> Result<Vec<Credential>> {
    Pager::offset(client, &root_url(client)?)?
        .extract_all()
        .await
}

/// Get a credential by name
pub async fn get(client: &ServiceClient, name: &str) -> Result<Credential> {
    client
        .get_json(&resource_url(client, name)?, RequestOpts::new())
        .await
}

/// Create a credential
pub async fn create(client: &ServiceClient, opts: &CreateCredentialOpts) -> Result<Credential> {
    let body = opts.to_body()?;
    client
        .request_json(Method::POST, &root_url(client)?, RequestOpts::new().json(body))
        .await
}

/// Replace a credential's username, password and registry
pub async fn update(
    client: &ServiceClient,
    name: &str,
    opts: &UpdateCredentialOpts,
) -> Result<Credential> {
    let body = opts.to_body()?;
    client
        .request_json(
            Method::PUT,
            &resource_url(client, name)?,
            RequestOpts::new().json(body),
        )
        .await
}

/// Delete a credential
pub async fn delete(client: &ServiceClient, name: &str) -> Result<()> {
    client
        .request(
            Method::DELETE,
            &resource_url(client, name)?,
            RequestOpts::new().ok_codes(&[204]),
        )
        .await?;
    Ok(())
}
