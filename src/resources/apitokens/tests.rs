//! Tests for the API tokens module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::http::{ClientConfig, ServiceClient, ToQuery, ToRequestBody};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_json() -> serde_json::Value {
    json!({
        "id": 42,
        "name": "My token",
        "description": "It's my token",
        "exp_date": null,
        "client_user": {
            "role": {"id": 1, "name": "Administrators"},
            "deleted": false,
            "user_id": 123,
            "user_name": "John Doe",
            "user_email": "some@email.com",
            "client_id": 3
        },
        "deleted": false,
        "expired": false,
        "created": "2021-01-01 12:00:00",
        "last_usage": "2021-01-01 12:00:00"
    })
}

fn expected_token() -> ApiToken {
    let at = Utc.with_ymd_and_hms(2021, 1, 1, 12, 0, 0).unwrap();
    ApiToken {
        id: 42,
        name: "My token".to_string(),
        description: Some("It's my token".to_string()),
        exp_date: None,
        client_user: ClientUser {
            role: TokenRole {
                id: TokenRoleId::Administrators,
                name: "Administrators".to_string(),
            },
            deleted: false,
            user_id: 123,
            user_name: "John Doe".to_string(),
            user_email: "some@email.com".to_string(),
            client_id: 3,
        },
        deleted: false,
        expired: false,
        created: at,
        last_usage: Some(at),
    }
}

fn client_for(server: &MockServer) -> ServiceClient {
    let config = ClientConfig::builder().api_url(server.uri()).build();
    ServiceClient::new(config, AuthConfig::api_token("token")).unwrap()
}

#[test_case(1, TokenRoleId::Administrators ; "administrators")]
#[test_case(2, TokenRoleId::Users ; "users")]
#[test_case(3, TokenRoleId::Engineers ; "engineers")]
#[test_case(5, TokenRoleId::PurgeAndPrefetchApi ; "purge api")]
#[test_case(6, TokenRoleId::PurgeAndPrefetchApiWeb ; "purge api web")]
fn test_role_ids(id: u64, role: TokenRoleId) {
    assert_eq!(TokenRoleId::try_from(id).unwrap(), role);
    assert_eq!(u64::from(role), id);
}

#[test]
fn test_unknown_role_id() {
    let err = TokenRoleId::try_from(4).unwrap_err();
    assert!(err.to_string().contains("1 (Administrators)"));
    assert!(serde_json::from_value::<TokenRole>(json!({"id": 4, "name": "x"})).is_err());
}

#[test]
fn test_list_opts_query() {
    let opts = ListOpts {
        role_id: Some(TokenRoleId::Engineers),
        issued_by: Some(7),
        ..ListOpts::default()
    };
    assert_eq!(
        opts.to_query().unwrap(),
        vec![
            ("role".to_string(), "3".to_string()),
            ("issued_by".to_string(), "7".to_string()),
        ]
    );

    let conflicting = ListOpts {
        issued_by: Some(7),
        not_issued_by: Some(7),
        ..ListOpts::default()
    };
    assert!(matches!(
        conflicting.to_query(),
        Err(Error::Validation { .. })
    ));
}

#[test]
fn test_create_opts_body() {
    let opts = CreateOpts {
        name: "My token".to_string(),
        description: Some("It's my token".to_string()),
        role_id: TokenRoleId::Administrators,
        exp_date: None,
    };
    assert_eq!(
        opts.to_body().unwrap(),
        json!({
            "name": "My token",
            "description": "It's my token",
            "client_user": {"role": {"id": 1}},
            "exp_date": null
        })
    );
}

#[test]
fn test_create_opts_rejects_past_expiry() {
    let opts = CreateOpts {
        name: "t".to_string(),
        description: None,
        role_id: TokenRoleId::Users,
        exp_date: Some(Utc::now() - Duration::days(1)),
    };
    assert!(matches!(opts.to_body(), Err(Error::Validation { .. })));
}

#[tokio::test]
async fn test_list_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iam/clients/3/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([token_json()])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tokens = list(&client, 3, &ListOpts::default()).await.unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0], expected_token());
    assert!(tokens[0].exp_date.is_none());
}

#[tokio::test]
async fn test_list_tokens_with_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iam/clients/3/tokens"))
        .and(query_param("deleted", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = ListOpts {
        deleted: true,
        ..ListOpts::default()
    };
    assert!(list(&client, 3, &opts).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iam/clients/3/tokens/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_eq!(get(&client, 3, 42).await.unwrap(), expected_token());
}

#[tokio::test]
async fn test_create_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/iam/clients/3/tokens"))
        .and(body_json(json!({
            "name": "My token",
            "client_user": {"role": {"id": 2}},
            "exp_date": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": "secret-value"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = CreateOpts {
        name: "My token".to_string(),
        description: None,
        role_id: TokenRoleId::Users,
        exp_date: None,
    };
    let created = create(&client, 3, &opts).await.unwrap();
    assert_eq!(created.token, "secret-value");
}

#[tokio::test]
async fn test_delete_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/iam/clients/3/tokens/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    delete(&client, 3, 42).await.unwrap();
}
