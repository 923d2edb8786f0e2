//! Tests for pagination module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::http::{ClientConfig, ServiceClient};
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(url: &str, body: serde_json::Value) -> Page {
    Page::new(Url::parse(url).unwrap(), body, "results")
}

fn client_for(server: &MockServer) -> ServiceClient {
    let config = ClientConfig::builder().api_url(server.uri()).build();
    ServiceClient::new(config, AuthConfig::None).unwrap()
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_results_from_object() {
    let p = page(
        "http://localhost/v1/projects",
        json!({"count": 2, "results": [{"id": 1}, {"id": 2}]}),
    );
    assert_eq!(p.len(), 2);
    assert!(!p.is_empty());
    assert_eq!(p.count(), Some(2));
}

#[test]
fn test_page_results_from_array() {
    let p = page("http://localhost/v1/x", json!([1, 2, 3]));
    assert_eq!(p.len(), 3);
    assert_eq!(p.extract::<u32>().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_page_missing_results_is_empty() {
    let p = page("http://localhost/v1/x", json!({"count": 10}));
    assert!(p.is_empty());
}

#[test]
fn test_page_extract_decode_error() {
    let p = page("http://localhost/v1/x", json!({"results": ["not a number"]}));
    assert!(matches!(p.extract::<u32>(), Err(Error::Decode { .. })));
}

#[test]
fn test_page_concat_preserves_order() {
    let a = page("http://localhost/x", json!({"results": [1, 2]}));
    let b = page("http://localhost/x?offset=2", json!({"results": [3]}));
    let combined = Page::concat(Url::parse("http://localhost/x").unwrap(), "results", vec![a, b]);
    assert_eq!(combined.extract::<u32>().unwrap(), vec![1, 2, 3]);
    assert_eq!(combined.count(), Some(3));
}

// ============================================================================
// Strategy Tests
// ============================================================================

#[test]
fn test_linked_follows_next() {
    let p = page(
        "http://localhost/v1/projects",
        json!({
            "results": [1],
            "links": [
                {"rel": "prev", "href": "http://localhost/v1/projects?page=0"},
                {"rel": "next", "href": "http://localhost/v1/projects?page=2"}
            ]
        }),
    );
    let next = LinkedPaginator::default().next_page(&p).unwrap();
    assert_eq!(
        next.url().map(Url::as_str),
        Some("http://localhost/v1/projects?page=2")
    );
}

#[test]
fn test_linked_resolves_relative_href() {
    let p = page(
        "http://localhost/v1/projects?page=1",
        json!({"results": [1], "links": [{"rel": "next", "href": "/v1/projects?page=2"}]}),
    );
    let next = LinkedPaginator::default().next_page(&p).unwrap();
    assert_eq!(
        next,
        NextPage::Continue(Url::parse("http://localhost/v1/projects?page=2").unwrap())
    );
}

#[test]
fn test_linked_without_next_is_done() {
    let p = page(
        "http://localhost/v1/projects",
        json!({"results": [1], "links": [{"rel": "self", "href": "/v1/projects"}]}),
    );
    assert!(LinkedPaginator::default().next_page(&p).unwrap().is_done());

    let p = page("http://localhost/v1/projects", json!({"results": [1]}));
    assert!(LinkedPaginator::default().next_page(&p).unwrap().is_done());
}

#[test]
fn test_linked_self_reference_is_done() {
    let p = page(
        "http://localhost/v1/projects?page=1",
        json!({"results": [1], "links": [{"rel": "next", "href": "/v1/projects?page=1"}]}),
    );
    assert!(LinkedPaginator::default().next_page(&p).unwrap().is_done());
}

#[test]
fn test_linked_malformed_href_is_error() {
    let p = page(
        "http://localhost/v1/projects",
        json!({"results": [1], "links": [{"rel": "next", "href": "http://[::1"}]}),
    );
    assert!(LinkedPaginator::default().next_page(&p).is_err());
}

#[test]
fn test_offset_advances_by_limit() {
    let p = page(
        "http://localhost/v1/items?name=x&limit=2&offset=4",
        json!({"results": [1, 2]}),
    );
    let next = OffsetPaginator::default().next_page(&p).unwrap();
    let url = next.url().unwrap();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("name".to_string(), "x".to_string()),
            ("limit".to_string(), "2".to_string()),
            ("offset".to_string(), "6".to_string()),
        ]
    );
}

#[test]
fn test_offset_default_limit() {
    let p = page("http://localhost/v1/items", json!({"results": [1]}));
    let next = OffsetPaginator::default().next_page(&p).unwrap();
    assert_eq!(
        next.url().unwrap().as_str(),
        "http://localhost/v1/items?limit=1000&offset=1000"
    );
}

#[test]
fn test_offset_first_page_fills_limit_and_offset() {
    let url = Url::parse("http://localhost/v1/items?name=x").unwrap();
    assert_eq!(
        OffsetPaginator::default().first_page(&url).as_str(),
        "http://localhost/v1/items?name=x&limit=1000&offset=0"
    );
}

#[test]
fn test_offset_first_page_keeps_explicit_values() {
    let url = Url::parse("http://localhost/v1/items?limit=2").unwrap();
    assert_eq!(
        OffsetPaginator::default().first_page(&url).as_str(),
        "http://localhost/v1/items?limit=2&offset=0"
    );

    let url = Url::parse("http://localhost/v1/items?offset=4&limit=2").unwrap();
    assert_eq!(OffsetPaginator::default().first_page(&url), url);
}

#[test]
fn test_linked_first_page_is_unchanged() {
    let url = Url::parse("http://localhost/v1/projects").unwrap();
    assert_eq!(LinkedPaginator::default().first_page(&url), url);
}

#[test]
fn test_offset_zero_limit_still_advances() {
    let p = page("http://localhost/v1/items?limit=0&offset=0", json!({"results": [1, 2, 3]}));
    let next = OffsetPaginator::default().next_page(&p).unwrap();
    assert!(next.url().unwrap().as_str().ends_with("offset=3"));
}

#[test]
fn test_offset_empty_page_is_done() {
    let p = page("http://localhost/v1/items?limit=2&offset=4", json!({"results": []}));
    assert!(OffsetPaginator::default().next_page(&p).unwrap().is_done());
}

#[test]
fn test_single_page_is_done() {
    let p = page("http://localhost/v1/items", json!({"results": [1]}));
    assert!(SinglePagePaginator.next_page(&p).unwrap().is_done());
}

// ============================================================================
// Pager Tests
// ============================================================================

async fn mount_offset_pages(server: &MockServer) {
    for (offset, items) in [("0", json!([1, 2])), ("2", json!([3, 4])), ("4", json!([5]))] {
        Mock::given(method("GET"))
            .and(path("/v1/items"))
            .and(query_param("offset", offset))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"count": 99, "results": items})),
            )
            .expect(1)
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("offset", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 99, "results": []})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_offset_all_pages_concatenates_until_empty() {
    let mock_server = MockServer::start().await;
    mount_offset_pages(&mock_server).await;

    let client = client_for(&mock_server);
    let pager = Pager::offset(&client, &client.url(&["v1", "items"]))
        .unwrap()
        .with_query(vec![
            ("limit".to_string(), "2".to_string()),
            ("offset".to_string(), "0".to_string()),
        ]);

    let all: Vec<u32> = pager.extract_all().await.unwrap();
    assert_eq!(all, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_offset_each_page_visits_in_order() {
    let mock_server = MockServer::start().await;
    mount_offset_pages(&mock_server).await;

    let client = client_for(&mock_server);
    let pager = Pager::offset(&client, &client.url(&["v1", "items"]))
        .unwrap()
        .with_query(vec![
            ("limit".to_string(), "2".to_string()),
            ("offset".to_string(), "0".to_string()),
        ]);

    let mut sizes = Vec::new();
    pager
        .each_page(|page| {
            sizes.push(page.len());
            Ok(true)
        })
        .await
        .unwrap();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[tokio::test]
async fn test_offset_without_limit_requests_default_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("limit", "1000"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [1, 2, 3, 4]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("limit", "1000"))
        .and(query_param("offset", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let pager = Pager::offset(&client, &client.url(&["v1", "items"])).unwrap();
    let all: Vec<u32> = pager.extract_all().await.unwrap();
    assert_eq!(all, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_offset_steps_by_limit_in_initial_url() {
    let mock_server = MockServer::start().await;

    for (offset, items) in [("0", json!([1, 2])), ("2", json!([3, 4])), ("4", json!([]))] {
        Mock::given(method("GET"))
            .and(path("/v1/users/assignments"))
            .and(query_param("limit", "2"))
            .and(query_param("offset", offset))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": items})))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    let url = format!("{}?limit=2", client.url(&["v1", "users", "assignments"]));
    let pager = Pager::offset(&client, &url).unwrap();
    let all: Vec<u32> = pager.extract_all().await.unwrap();
    assert_eq!(all, vec![1, 2, 3, 4]);
}

async fn mount_link_cycle(server: &MockServer) {
    for (from, to) in [("/v1/a", "/v1/b"), ("/v1/b", "/v1/a")] {
        Mock::given(method("GET"))
            .and(path(from))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [from],
                "links": [{"rel": "next", "href": to}]
            })))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_linked_cycle_is_decode_error() {
    let mock_server = MockServer::start().await;
    mount_link_cycle(&mock_server).await;

    let client = client_for(&mock_server);
    let pager = Pager::linked(&client, &client.url(&["v1", "a"])).unwrap();
    let err = pager.all_pages().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.to_string().contains("/v1/a already visited"));
}

#[tokio::test]
async fn test_linked_cycle_ends_stream_with_error() {
    let mock_server = MockServer::start().await;
    mount_link_cycle(&mock_server).await;

    let client = client_for(&mock_server);
    let pager = Pager::linked(&client, &client.url(&["v1", "a"])).unwrap();
    let results: Vec<crate::error::Result<Page>> = pager.into_stream().collect().await;
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(Error::Decode { .. })));
}

#[tokio::test]
async fn test_early_stop_ignores_malformed_next_link() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [1],
            "links": [{"rel": "next", "href": "http://[::1"}]
        })))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let pager = Pager::linked(&client, &client.url(&["v1", "items"])).unwrap();
    let mut visited = Vec::new();
    pager
        .each_page(|page| {
            visited.extend(page.extract::<u32>()?);
            Ok(false)
        })
        .await
        .unwrap();
    assert_eq!(visited, vec![1]);

    // asking for more still surfaces the bad link
    let err = pager.each_page(|_| Ok(true)).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));

    let mut stream = Box::pin(pager.into_stream());
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.extract::<u32>().unwrap(), vec![1]);
}

#[tokio::test]
async fn test_each_page_stops_when_visit_returns_false() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [1],
            "links": [{"rel": "next", "href": "/v1/items/page2"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/items/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [2]})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let pager = Pager::linked(&client, &client.url(&["v1", "items"])).unwrap();
    let mut visited = 0;
    pager
        .each_page(|_| {
            visited += 1;
            Ok(false)
        })
        .await
        .unwrap();
    assert_eq!(visited, 1);
}

#[tokio::test]
async fn test_each_page_propagates_visit_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [1]})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let pager = Pager::linked(&client, &client.url(&["v1", "items"])).unwrap();
    let err = pager
        .each_page(|_| Err(Error::Other("stop".to_string())))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "stop");
}

#[tokio::test]
async fn test_linked_terminates_after_last_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1}],
            "links": [{"rel": "next", "href": "/v1/items/next"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/items/next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 2}],
            "links": [{"rel": "prev", "href": "/v1/items"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let pager = Pager::linked(&client, &client.url(&["v1", "items"])).unwrap();
    let all: Vec<serde_json::Value> = pager.extract_all().await.unwrap();
    assert_eq!(all, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn test_fetch_error_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let pager = Pager::linked(&client, &client.url(&["v1", "items"])).unwrap();
    let err = pager.all_pages().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_into_stream() {
    let mock_server = MockServer::start().await;
    mount_offset_pages(&mock_server).await;

    let client = client_for(&mock_server);
    let pager = Pager::offset(&client, &client.url(&["v1", "items"]))
        .unwrap()
        .with_query(vec![
            ("limit".to_string(), "2".to_string()),
            ("offset".to_string(), "0".to_string()),
        ]);

    let pages: Vec<Page> = pager.into_stream().try_collect().await.unwrap();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2].extract::<u32>().unwrap(), vec![5]);
}

#[tokio::test]
async fn test_pager_is_restartable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": [7]})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let pager = Pager::single(&client, &client.url(&["v1", "items"])).unwrap();
    assert_eq!(pager.extract_all::<u32>().await.unwrap(), vec![7]);
    assert_eq!(pager.extract_all::<u32>().await.unwrap(), vec![7]);
}
