//! Authenticator implementation
//!
//! Produces the `Authorization` header for outgoing requests and performs
//! login / token refresh against the platform auth service.

use super::types::{AuthConfig, Credentials, TokenPair};
use crate::error::{Error, Result};
use reqwest::Client;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info};

const LOGIN_PATH: &str = "auth/jwt/login";
const REFRESH_PATH: &str = "auth/jwt/refresh";

/// Authenticator holds the credentials and the current token pair.
///
/// Token state is mutated in place on login/refresh. Each request reads the
/// access token when it is sent; there is no coordination between
/// concurrent callers refreshing at the same time, so sharing one
/// authenticator across tasks that may race on a 401 is the caller's
/// responsibility.
pub struct Authenticator {
    config: AuthConfig,
    tokens: RwLock<Option<TokenPair>>,
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        let tokens = match &config {
            AuthConfig::Platform { tokens, .. } => tokens.clone(),
            _ => None,
        };
        Self {
            config,
            tokens: RwLock::new(tokens),
            http_client,
        }
    }

    /// Value for the `Authorization` header, logging in first if platform
    /// auth has credentials but no token yet.
    pub async fn authorization(&self) -> Result<Option<String>> {
        match &self.config {
            AuthConfig::None => Ok(None),
            AuthConfig::ApiToken { token } => Ok(Some(format!("APIKey {token}"))),
            AuthConfig::Platform { .. } => {
                if let Some(pair) = self.tokens.read().await.as_ref() {
                    return Ok(Some(format!("Bearer {}", pair.access)));
                }
                let pair = self.login().await?;
                Ok(Some(format!("Bearer {}", pair.access)))
            }
        }
    }

    /// Whether a 401 can be answered by obtaining a new token
    pub async fn can_reauthenticate(&self) -> bool {
        match &self.config {
            AuthConfig::Platform { credentials, .. } => {
                credentials.is_some()
                    || self
                        .tokens
                        .read()
                        .await
                        .as_ref()
                        .is_some_and(|t| t.refresh.is_some())
            }
            _ => false,
        }
    }

    /// Obtain a new token pair: refresh when a refresh token is held,
    /// otherwise log in again with the stored credentials.
    pub async fn reauthenticate(&self) -> Result<TokenPair> {
        let refresh = self
            .tokens
            .read()
            .await
            .as_ref()
            .and_then(|t| t.refresh.clone());

        match refresh {
            Some(refresh) => self.refresh(&refresh).await,
            None => self.login().await,
        }
    }

    /// Log in with the stored credentials
    pub async fn login(&self) -> Result<TokenPair> {
        let (auth_url, credentials) = match &self.config {
            AuthConfig::Platform {
                auth_url,
                credentials: Some(credentials),
                ..
            } => (auth_url, credentials),
            _ => return Err(Error::auth("No username/password configured for login")),
        };

        info!("Logging in as {}", credentials.username);
        let pair = self
            .fetch_tokens(auth_url, LOGIN_PATH, login_body(credentials))
            .await?;
        self.store(pair.clone()).await;
        Ok(pair)
    }

    /// Exchange a refresh token for a new pair
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let AuthConfig::Platform { auth_url, .. } = &self.config else {
            return Err(Error::auth("Token refresh not supported for this auth type"));
        };

        info!("Refreshing access token");
        let mut pair = self
            .fetch_tokens(auth_url, REFRESH_PATH, json!({ "refresh": refresh_token }))
            .await?;
        // Some deployments only return a new access token on refresh.
        if pair.refresh.is_none() {
            pair.refresh = Some(refresh_token.to_string());
        }
        self.store(pair.clone()).await;
        Ok(pair)
    }

    async fn fetch_tokens(
        &self,
        auth_url: &str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<TokenPair> {
        let url = format!("{}/{path}", auth_url.trim_end_matches('/'));
        debug!("POST {url}");

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::Http)?;
        if !status.is_success() {
            return Err(Error::Reauth {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::decode(format!("Invalid token response from {url}: {e}")))
    }

    async fn store(&self, pair: TokenPair) {
        *self.tokens.write().await = Some(pair);
    }

    /// Current token pair, if any
    pub async fn tokens(&self) -> Option<TokenPair> {
        self.tokens.read().await.clone()
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.config {
            AuthConfig::None => "none",
            AuthConfig::ApiToken { .. } => "api_token",
            AuthConfig::Platform { .. } => "platform",
        };
        f.debug_struct("Authenticator")
            .field("kind", &kind)
            .finish_non_exhaustive()
    }
}

fn login_body(credentials: &Credentials) -> serde_json::Value {
    json!({
        "username": credentials.username,
        "password": credentials.password,
    })
}
