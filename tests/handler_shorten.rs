mod common;

use serde_json::{Value, json};
use shortkey::domain::repositories::MappingRepository;
use shortkey::utils::key_generator::is_valid_key;

#[tokio::test]
async fn test_shorten_form_success() {
    let state = common::create_test_state();
    let server = common::create_test_server(state.clone());

    let response = server
        .post("/shorten")
        .form(&[("url", "https://example.com/page")])
        .await;

    assert_eq!(response.status_code(), 200);

    let (key, clicks) = common::stored_mapping(&state, "https://example.com/page")
        .await
        .unwrap();
    assert!(is_valid_key(&key));
    assert_eq!(clicks, 0);

    let body = response.text();
    assert!(body.contains("https://example.com/page"));
    assert!(body.contains(&format!("{}/short/{}", common::BASE_URL, key)));
    assert!(body.contains(r#"<strong id="clicks">0</strong>"#));
}

#[tokio::test]
async fn test_shorten_form_twice_reuses_key() {
    let state = common::create_test_state();
    let server = common::create_test_server(state.clone());

    server
        .post("/shorten")
        .form(&[("url", "https://example.com/again")])
        .await;
    let (first_key, _) = common::stored_mapping(&state, "https://example.com/again")
        .await
        .unwrap();

    let response = server
        .post("/shorten")
        .form(&[("url", "https://example.com/again")])
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains(r#"<strong id="clicks">1</strong>"#));

    let (second_key, clicks) = common::stored_mapping(&state, "https://example.com/again")
        .await
        .unwrap();
    assert_eq!(first_key, second_key);
    assert_eq!(clicks, 1);
    assert_eq!(state.repository.count_all().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_form_missing_url() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.post("/shorten").form(&[("other", "x")]).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_form_empty_url() {
    let state = common::create_test_state();
    let server = common::create_test_server(state.clone());

    let response = server.post("/shorten").form(&[("url", "")]).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(state.repository.count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_form_invalid_url() {
    let state = common::create_test_state();
    let server = common::create_test_server(state.clone());

    let response = server
        .post("/shorten")
        .form(&[("url", "not a url")])
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(state.repository.count_all().await.unwrap(), 0);
}

#[tokio::test]
async fn test_api_shorten_created_then_reused() {
    let server = common::create_test_server(common::create_test_state());

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/api" }))
        .await;

    assert_eq!(first.status_code(), 201);
    let first: Value = first.json();
    assert_eq!(first["created"], true);
    assert_eq!(first["clicks"], 0);
    assert_eq!(first["original_url"], "https://example.com/api");

    let key = first["short_key"].as_str().unwrap().to_string();
    assert!(is_valid_key(&key));
    assert_eq!(
        first["short_url"],
        format!("{}/short/{}", common::BASE_URL, key)
    );

    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/api" }))
        .await;

    assert_eq!(second.status_code(), 200);
    let second: Value = second.json();
    assert_eq!(second["created"], false);
    assert_eq!(second["short_key"], key.as_str());
    assert_eq!(second["clicks"], 1);
}

#[tokio::test]
async fn test_api_shorten_invalid_url() {
    let server = common::create_test_server(common::create_test_state());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "nope" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"]["fields"][0], "url");
}
