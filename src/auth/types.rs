//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by the platform auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token sent as a bearer token
    #[serde(rename = "access")]
    pub access: String,
    /// Long-lived refresh token, if the endpoint issued one
    #[serde(rename = "refresh", default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl TokenPair {
    /// Create a new token pair
    pub fn new(access: impl Into<String>, refresh: Option<String>) -> Self {
        Self {
            access: access.into(),
            refresh,
        }
    }
}

/// Username/password credentials used for a full login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication (useful against local mocks)
    #[default]
    None,

    /// Permanent API token, sent as `Authorization: APIKey <token>`.
    /// Cannot be refreshed.
    ApiToken {
        /// The API token value
        token: String,
    },

    /// Platform JWT authentication
    Platform {
        /// Base URL of the auth service (`{auth_url}/auth/jwt/login`)
        auth_url: String,
        /// Credentials for a full login, when known
        credentials: Option<Credentials>,
        /// Tokens obtained earlier, when known
        tokens: Option<TokenPair>,
    },
}

impl AuthConfig {
    /// Platform auth from username and password
    pub fn password(
        auth_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::Platform {
            auth_url: auth_url.into(),
            credentials: Some(Credentials {
                username: username.into(),
                password: password.into(),
            }),
            tokens: None,
        }
    }

    /// Platform auth from an existing token pair
    pub fn tokens(auth_url: impl Into<String>, tokens: TokenPair) -> Self {
        Self::Platform {
            auth_url: auth_url.into(),
            credentials: None,
            tokens: Some(tokens),
        }
    }

    /// Permanent API token auth
    pub fn api_token(token: impl Into<String>) -> Self {
        Self::ApiToken {
            token: token.into(),
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_token_pair_deserialize() {
        let pair: TokenPair = serde_json::from_str(r#"{"access": "a", "refresh": "r"}"#).unwrap();
        assert_eq!(pair, TokenPair::new("a", Some("r".to_string())));

        let pair: TokenPair = serde_json::from_str(r#"{"access": "a"}"#).unwrap();
        assert!(pair.refresh.is_none());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            username: "user".to_string(),
            password: "secret".to_string(),
        };
        let out = format!("{creds:?}");
        assert!(out.contains("user"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn test_auth_config_default() {
        assert!(matches!(AuthConfig::default(), AuthConfig::None));
    }
}
