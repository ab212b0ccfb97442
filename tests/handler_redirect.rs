mod common;

use serde_json::Value;
use shortkey::domain::repositories::MappingRepository;
use shortkey::utils::key_generator::is_valid_key;

#[tokio::test]
async fn test_redirect_success() {
    let state = common::create_test_state();
    let server = common::create_test_server(state.clone());

    server
        .post("/shorten")
        .form(&[("url", "https://example.com/target?q=1")])
        .await;
    let (key, _) = common::stored_mapping(&state, "https://example.com/target?q=1")
        .await
        .unwrap();

    let response = server.get(&format!("/short/{key}")).await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/target?q=1");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let state = common::create_test_state();
    let server = common::create_test_server(state.clone());

    let response = server.get("/short/nope00").await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(state.repository.count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn test_redirect_missing_key() {
    let server = common::create_test_server(common::create_test_state());

    for path in ["/short", "/short/"] {
        let response = server.get(path).await;

        assert_eq!(response.status_code(), 400, "path {path}");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "validation_error");
    }
}

#[tokio::test]
async fn test_click_counting_scenario() {
    let state = common::create_test_state();
    let server = common::create_test_server(state.clone());
    let url = "https://example.com/scenario";

    let response = server.post("/shorten").form(&[("url", url)]).await;
    assert_eq!(response.status_code(), 200);

    let (key, clicks) = common::stored_mapping(&state, url).await.unwrap();
    assert_eq!(key.len(), 6);
    assert!(is_valid_key(&key));
    assert_eq!(clicks, 0);

    let response = server.get(&format!("/short/{key}")).await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), url);
    assert_eq!(common::stored_mapping(&state, url).await, Some((key.clone(), 1)));

    let response = server.post("/shorten").form(&[("url", url)]).await;
    assert_eq!(response.status_code(), 200);
    let body = response.text();
    assert!(body.contains(&format!("/short/{key}")));
    assert!(body.contains(r#"<strong id="clicks">2</strong>"#));
    assert_eq!(common::stored_mapping(&state, url).await, Some((key, 2)));
}

#[tokio::test]
async fn test_redirect_updates_stats() {
    let state = common::create_test_state();
    let server = common::create_test_server(state.clone());

    server
        .post("/shorten")
        .form(&[("url", "https://example.com/stats")])
        .await;
    let (key, _) = common::stored_mapping(&state, "https://example.com/stats")
        .await
        .unwrap();

    server.get(&format!("/short/{key}")).await;
    server.get(&format!("/short/{key}")).await;

    let response = server.get("/api/stats").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["total_shortened_links"], 1);
    assert_eq!(body["total_clicks"], 2);
    assert_eq!(body["clicks_per_short_link"][key.as_str()], 2);
}
