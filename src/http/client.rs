//! Authenticated service client
//!
//! Wraps a reqwest client with:
//! - Bearer/APIKey authorization on every request
//! - A single reauthentication-and-retry when a request gets 401
//! - Accepted status code checking per operation
//! - Optional client-side rate limiting
//! - URL building for versioned, project/region scoped resources

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator, TokenPair};
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the service client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g. `https://api.example.com/cloud`)
    pub api_url: String,
    /// Project scope for regional resources
    pub project_id: Option<u64>,
    /// Region scope for regional resources
    pub region_id: Option<u64>,
    /// Request timeout
    pub timeout: Duration,
    /// Whether a 401 may trigger reauthentication
    pub allow_reauth: bool,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            project_id: None,
            region_id: None,
            timeout: Duration::from_secs(60),
            allow_reauth: true,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("gcloud-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for the client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the project scope
    pub fn project(mut self, project_id: u64) -> Self {
        self.config.project_id = Some(project_id);
        self
    }

    /// Set the region scope
    pub fn region(mut self, region_id: u64) -> Self {
        self.config.region_id = Some(region_id);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Allow or forbid reauthentication on 401
    pub fn allow_reauth(mut self, allow: bool) -> Self {
        self.config.allow_reauth = allow;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Options for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestOpts {
    /// Query parameters
    pub query: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
    /// Accepted status codes; empty means the method default
    pub ok_codes: Vec<u16>,
}

impl RequestOpts {
    /// Create new request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Override the accepted status codes
    #[must_use]
    pub fn ok_codes(mut self, codes: &[u16]) -> Self {
        self.ok_codes = codes.to_vec();
        self
    }
}

/// Status codes accepted when an operation does not declare its own
pub fn default_ok_codes(method: &Method) -> &'static [u16] {
    match *method {
        Method::GET => &[200],
        Method::POST => &[200, 201, 202],
        Method::PUT => &[200, 201, 202],
        Method::PATCH => &[200, 202, 204],
        Method::DELETE => &[200, 202, 204],
        _ => &[200],
    }
}

/// Service client: one per CLI invocation or SDK consumer
pub struct ServiceClient {
    client: Client,
    config: ClientConfig,
    base_url: Url,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl ServiceClient {
    /// Create a client with authentication
    pub fn new(config: ClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        let base_url = Url::parse(&config.api_url)
            .map_err(|e| Error::config(format!("Invalid api_url '{}': {e}", config.api_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "api_url '{}' cannot carry a path",
                config.api_url
            )));
        }

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);
        let authenticator = Authenticator::with_client(auth_config, client.clone());

        Ok(Self {
            client,
            config,
            base_url,
            authenticator,
            rate_limiter,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the authenticator
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Current token pair (platform auth only)
    pub async fn tokens(&self) -> Option<TokenPair> {
        self.authenticator.tokens().await
    }

    // ------------------------------------------------------------------------
    // URL building
    // ------------------------------------------------------------------------

    /// `{api_url}/{segments...}`
    ///
    /// Each segment is percent-encoded, so a `/`, `?` or `#` inside a
    /// resource name stays part of that one path segment.
    pub fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    /// `{api_url}/{version}/{resource}/{project}/{region}/{extra...}`
    pub fn regional_url(&self, version: &str, resource: &str, extra: &[&str]) -> Result<String> {
        let project = self.project_id()?.to_string();
        let region = self.region_id()?.to_string();
        let mut segments = vec![version, resource, project.as_str(), region.as_str()];
        segments.extend_from_slice(extra);
        Ok(self.url(&segments))
    }

    /// `{api_url}/{version}/{resource}/{project}/{extra...}`
    pub fn project_url(&self, version: &str, resource: &str, extra: &[&str]) -> Result<String> {
        let project = self.project_id()?.to_string();
        let mut segments = vec![version, resource, project.as_str()];
        segments.extend_from_slice(extra);
        Ok(self.url(&segments))
    }

    /// Configured project, or a config error
    pub fn project_id(&self) -> Result<u64> {
        self.config
            .project_id
            .ok_or_else(|| Error::missing_field("project_id"))
    }

    /// Configured region, or a config error
    pub fn region_id(&self) -> Result<u64> {
        self.config
            .region_id
            .ok_or_else(|| Error::missing_field("region_id"))
    }

    // ------------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------------

    /// Perform a request, reauthenticating and retrying once on 401.
    ///
    /// Returns the response when its status is in the accepted set; every
    /// other status becomes an error carrying the raw body.
    pub async fn request(&self, method: Method, url: &str, opts: RequestOpts) -> Result<Response> {
        let ok_codes: &[u16] = if opts.ok_codes.is_empty() {
            default_ok_codes(&method)
        } else {
            &opts.ok_codes
        };

        let mut reauthenticated = false;
        loop {
            let response = self.send(&method, url, &opts).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                let body = response.text().await.unwrap_or_default();
                if !reauthenticated
                    && self.config.allow_reauth
                    && self.authenticator.can_reauthenticate().await
                {
                    warn!("{method} {url} returned 401, reauthenticating");
                    self.authenticator.reauthenticate().await?;
                    reauthenticated = true;
                    continue;
                }
                return Err(Error::Unauthorized {
                    method: method.to_string(),
                    url: url.to_string(),
                    body,
                });
            }

            if ok_codes.contains(&status.as_u16()) {
                debug!("{method} {url} -> {}", status.as_u16());
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound {
                    url: url.to_string(),
                    body,
                });
            }
            return Err(Error::unexpected_response(
                &method,
                url,
                ok_codes,
                status.as_u16(),
                body,
            ));
        }
    }

    async fn send(&self, method: &Method, url: &str, opts: &RequestOpts) -> Result<Response> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self
            .client
            .request(method.clone(), url)
            .header(reqwest::header::ACCEPT, "application/json");

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(value) = self.authenticator.authorization().await? {
            req = req.header(reqwest::header::AUTHORIZATION, value);
        }

        if !opts.query.is_empty() {
            req = req.query(&opts.query);
        }

        if let Some(ref body) = opts.body {
            req = req.json(body);
        }

        debug!("{method} {url}");
        req.send().await.map_err(Error::Http)
    }

    /// Perform a request and decode the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        opts: RequestOpts,
    ) -> Result<T> {
        let response = self.request(method, url, opts).await?;
        decode_json(response).await
    }

    /// GET and decode
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, opts: RequestOpts) -> Result<T> {
        self.request_json(Method::GET, url, opts).await
    }

    /// POST a serializable body and decode the response
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let opts = RequestOpts::new().json(serde_json::to_value(body)?);
        self.request_json(Method::POST, url, opts).await
    }

    /// PUT a serializable body and decode the response
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let opts = RequestOpts::new().json(serde_json::to_value(body)?);
        self.request_json(Method::PUT, url, opts).await
    }

    /// PATCH a serializable body and decode the response
    pub async fn patch_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let opts = RequestOpts::new().json(serde_json::to_value(body)?);
        self.request_json(Method::PATCH, url, opts).await
    }

    /// DELETE, discarding the body
    pub async fn delete(&self, url: &str) -> Result<()> {
        self.request(Method::DELETE, url, RequestOpts::new()).await?;
        Ok(())
    }

    /// DELETE and decode the response
    pub async fn delete_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.request_json(Method::DELETE, url, RequestOpts::new())
            .await
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("config", &self.config)
            .field("authenticator", &self.authenticator)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Decode a response body, keeping decode failures distinct from HTTP ones
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let url = response.url().to_string();
    let text = response.text().await.map_err(Error::Http)?;
    serde_json::from_str(&text).map_err(|e| Error::decode(format!("{url}: {e}")))
}
