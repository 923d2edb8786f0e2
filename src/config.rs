//! Profile configuration
//!
//! A profile is a YAML document naming the endpoints, the scope and the
//! credentials to use. CLI flags and environment variables are merged on
//! top of the file before the client is built.
//!
//! ```yaml
//! api_url: https://api.example.com/cloud
//! auth_url: https://api.example.com/iam
//! project_id: 1
//! region_id: 76
//! username: user@example.com
//! password: secret
//! rate_limit:
//!   requests_per_second: 10
//! ```

use crate::auth::{AuthConfig, Credentials, TokenPair};
use crate::error::{Error, Result};
use crate::http::{ClientConfig, RateLimiterConfig, ServiceClient};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection profile loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// Base URL of the cloud API
    pub api_url: Option<String>,
    /// Base URL of the auth service
    pub auth_url: Option<String>,
    /// Project scope
    pub project_id: Option<u64>,
    /// Region scope
    pub region_id: Option<u64>,
    /// Client (account) ID, used by IAM resources
    pub client_id: Option<u64>,
    /// Login username
    pub username: Option<String>,
    /// Login password
    pub password: Option<String>,
    /// Previously issued access token
    pub access_token: Option<String>,
    /// Previously issued refresh token
    pub refresh_token: Option<String>,
    /// Permanent API token (disables refresh)
    pub api_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Whether a 401 may trigger reauthentication
    pub allow_reauth: Option<bool>,
    /// Client-side rate limit
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Profile {
    /// Load a profile from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read profile {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse a profile from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Default profile location: `$HOME/.gcloud/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".gcloud").join("config.yaml"))
    }

    /// Overlay `other` on top of `self`; set fields of `other` win
    #[must_use]
    pub fn merge(self, other: Profile) -> Profile {
        Profile {
            api_url: other.api_url.or(self.api_url),
            auth_url: other.auth_url.or(self.auth_url),
            project_id: other.project_id.or(self.project_id),
            region_id: other.region_id.or(self.region_id),
            client_id: other.client_id.or(self.client_id),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            access_token: other.access_token.or(self.access_token),
            refresh_token: other.refresh_token.or(self.refresh_token),
            api_token: other.api_token.or(self.api_token),
            timeout_seconds: other.timeout_seconds.or(self.timeout_seconds),
            allow_reauth: other.allow_reauth.or(self.allow_reauth),
            rate_limit: other.rate_limit.or(self.rate_limit),
        }
    }

    /// Build the runtime client configuration
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_url = self
            .api_url
            .clone()
            .ok_or_else(|| Error::missing_field("api_url"))?;
        url::Url::parse(&api_url)?;

        let mut config = ClientConfig {
            api_url,
            project_id: self.project_id,
            region_id: self.region_id,
            allow_reauth: self.allow_reauth.unwrap_or(true),
            rate_limit: self.rate_limit.clone(),
            ..ClientConfig::default()
        };
        if let Some(secs) = self.timeout_seconds {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Pick the authentication mode from the available credentials.
    ///
    /// A permanent API token wins; otherwise platform auth is used with
    /// whatever tokens and credentials are present.
    pub fn auth_config(&self) -> Result<AuthConfig> {
        if let Some(token) = &self.api_token {
            return Ok(AuthConfig::api_token(token.clone()));
        }

        let credentials = match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            (Some(_), None) => return Err(Error::missing_field("password")),
            _ => None,
        };
        let tokens = self
            .access_token
            .as_ref()
            .map(|access| TokenPair::new(access.clone(), self.refresh_token.clone()));

        if credentials.is_none() && tokens.is_none() {
            return Err(Error::missing_field(
                "api_token, access_token or username/password",
            ));
        }

        let auth_url = self
            .auth_url
            .clone()
            .ok_or_else(|| Error::missing_field("auth_url"))?;

        Ok(AuthConfig::Platform {
            auth_url,
            credentials,
            tokens,
        })
    }

    /// Build a service client from this profile
    pub fn into_client(self) -> Result<ServiceClient> {
        ServiceClient::new(self.client_config()?, self.auth_config()?)
    }
}
