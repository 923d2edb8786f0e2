//! Tests for the inference module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::http::{ClientConfig, ServiceClient, ToRequestBody};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ServiceClient {
    let config = ClientConfig::builder()
        .api_url(server.uri())
        .project(1)
        .build();
    ServiceClient::new(config, AuthConfig::api_token("token")).unwrap()
}

fn flavor_json() -> serde_json::Value {
    json!({
        "name": "inference-16vcpu-232gib-1xh100-80gb",
        "cpu": 16,
        "memory": 232,
        "gpu": 1,
        "gpu_model": "H100",
        "gpu_memory": 80,
        "gpu_compute_capability": "9.0"
    })
}

fn credential_json() -> serde_json::Value {
    json!({
        "name": "docker-io",
        "username": "bot",
        "registry_url": "registry.example.com",
        "project_id": 1
    })
}

fn create_opts(name: &str) -> CreateCredentialOpts {
    CreateCredentialOpts {
        name: name.to_string(),
        username: "bot".to_string(),
        password: "secret".to_string(),
        registry_url: "registry.example.com".to_string(),
    }
}

#[test]
fn test_create_credential_validation() {
    assert!(create_opts("docker-io").to_body().is_ok());
    assert!(matches!(
        create_opts("Docker IO").to_body(),
        Err(Error::Validation { .. })
    ));

    let mut opts = create_opts("docker-io");
    opts.password = String::new();
    assert!(matches!(
        opts.to_body(),
        Err(Error::Validation { field, .. }) if field == "password"
    ));
}

#[test]
fn test_credential_opts_debug_hides_password() {
    let debug = format!("{:?}", create_opts("docker-io"));
    assert!(!debug.contains("secret"));
}

#[tokio::test]
async fn test_list_flavors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/inference/flavors"))
        .and(query_param("offset", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1, "results": []})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/inference/flavors"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"count": 1, "results": [flavor_json()]})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let flavors = flavors::list(&client).await.unwrap();
    assert_eq!(flavors.len(), 1);
    assert_eq!(flavors[0].gpu_model.as_deref(), Some("H100"));
    assert!((flavors[0].memory - 232.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_get_flavor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/inference/flavors/inference-16vcpu-232gib-1xh100-80gb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flavor_json()))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let flavor = flavors::get(&client, "inference-16vcpu-232gib-1xh100-80gb")
        .await
        .unwrap();
    assert_eq!(flavor.gpu, 1);
}

#[tokio::test]
async fn test_credentials_crud() {
    let mock_server = MockServer::start().await;
    let root = "/v3/inference/1/registry_credentials";

    Mock::given(method("POST"))
        .and(path(root))
        .and(body_json(json!({
            "name": "docker-io",
            "username": "bot",
            "password": "secret",
            "registry_url": "registry.example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{root}/docker-io")))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_json()))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("{root}/docker-io")))
        .respond_with(ResponseTemplate::new(201).set_body_json(credential_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{root}/docker-io")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = credentials::create(&client, &create_opts("docker-io"))
        .await
        .unwrap();
    assert_eq!(created.name, "docker-io");
    assert_eq!(credentials::get(&client, "docker-io").await.unwrap(), created);

    let update = UpdateCredentialOpts {
        username: "bot".to_string(),
        password: "rotated".to_string(),
        registry_url: "registry.example.com".to_string(),
    };
    credentials::update(&client, "docker-io", &update).await.unwrap();
    credentials::delete(&client, "docker-io").await.unwrap();
}

#[tokio::test]
async fn test_credentials_require_project() {
    let config = ClientConfig::builder().api_url("http://127.0.0.1:1").build();
    let client = ServiceClient::new(config, AuthConfig::None).unwrap();
    assert!(matches!(
        credentials::list(&client).await,
        Err(Error::MissingConfigField { .. })
    ));
}

#[tokio::test]
async fn test_credential_name_stays_one_path_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/inference/1/registry_credentials/team%2Fdocker%3Fx%23y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let credential = credentials::get(&client, "team/docker?x#y").await.unwrap();
    assert_eq!(credential.name, "docker-io");
}
