//! Message posting integration tests
//!
//! End-to-end tests for `POST /post` and `POST /chat.html`: body decoding,
//! validation, storage on disk, and the redirect contract.

mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use common::TestSite;

#[tokio::test]
async fn test_json_post_redirects_and_stores_one_file() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let response = server
        .post("/post")
        .json(&serde_json::json!({
            "content": "hi",
            "author": "a",
            "channel": "test"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/chat/test.html"
    );
    assert_eq!(site.message_count("test"), 1);
}

#[tokio::test]
async fn test_post_to_chat_html_is_equivalent() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let response = server
        .post("/chat.html")
        .json(&serde_json::json!({ "content": "hello", "channel": "general" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/chat/general.html"
    );
    assert_eq!(site.message_count("general"), 1);
}

#[tokio::test]
async fn test_form_post_defaults_to_general_channel() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let response = server
        .post("/post")
        .form(&[("content", "hello there"), ("author", "bob"), ("tags", "a b")])
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/chat/general.html"
    );
    assert_eq!(site.message_count("general"), 1);
}

#[tokio::test]
async fn test_stored_file_format() {
    let site = TestSite::new().await;
    let server = site.server().await;

    server
        .post("/post")
        .json(&serde_json::json!({
            "content": "body text",
            "author": "carol",
            "tags": ["rust", "chat"],
            "channel": "fmt"
        }))
        .await;

    let dir = site.root().join("message/fmt");
    let entry = std::fs::read_dir(&dir)
        .unwrap()
        .flatten()
        .find(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
        .expect("no message file written");
    let body = std::fs::read_to_string(entry.path()).unwrap();

    assert_eq!(body, "Author: carol\nChannel: fmt\n\nbody text\n\nrust chat");
}

#[tokio::test]
async fn test_same_second_posts_do_not_overwrite() {
    let site = TestSite::new().await;
    let server = site.server().await;

    for _ in 0..2 {
        let response = server
            .post("/post")
            .json(&serde_json::json!({ "content": "fast", "channel": "burst" }))
            .await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    }

    assert_eq!(site.message_count("burst"), 2);
}

#[tokio::test]
async fn test_empty_content_is_rejected_without_writes() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let response = server
        .post("/post")
        .json(&serde_json::json!({ "content": "   ", "channel": "test" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(!site.exists("message"));
}

#[tokio::test]
async fn test_traversal_channel_is_rejected_without_writes() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let response = server
        .post("/post")
        .json(&serde_json::json!({ "content": "hi", "channel": "../evil" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(!site.exists("message"));
    assert!(!site.root().parent().unwrap().join("evil").exists());
}

#[tokio::test]
async fn test_unsupported_content_type_is_400() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let response = server
        .post("/post")
        .content_type("text/plain")
        .bytes(Bytes::from("content=hi"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let response = server
        .post("/post")
        .content_type("application/json")
        .bytes(Bytes::from("{not json"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let huge = "x".repeat(1024 * 1024 + 16);
    let response = server
        .post("/post")
        .content_type("application/json")
        .bytes(Bytes::from(huge))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_post_to_unknown_path_is_405() {
    let site = TestSite::new().await;
    let server = site.server().await;

    let response = server.post("/somewhere/else").text("x").await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_post_regenerates_channel_page() {
    let site = TestSite::new().await;
    let server = site.server().await;

    server
        .post("/post")
        .json(&serde_json::json!({ "content": "fresh news", "channel": "general" }))
        .await;

    // The write-triggered rebuild ran the shell backend, which embeds the
    // stored message file into the artifact.
    let artifact = site.read("chat_general.html").await;
    assert!(artifact.contains("fresh news"), "artifact: {}", artifact);
}

#[tokio::test]
async fn test_post_html_content_is_escaped_on_disk() {
    let site = TestSite::new().await;
    let server = site.server().await;

    server
        .post("/post")
        .json(&serde_json::json!({
            "content": "<script>alert(1)</script>",
            "channel": "general"
        }))
        .await;

    let artifact = site.read("chat_general.html").await;
    assert!(!artifact.contains("<script>alert"));
    assert!(artifact.contains("&lt;script&gt;"));
}
