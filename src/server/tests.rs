use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
};
use tower::ServiceExt;

use super::*;

fn test_router() -> Router {
    let config = ServerConfig {
        listen: SocketAddr::from(([127, 0, 0, 1], 0)),
        max_body_bytes: 4096,
    };
    create_router(&config)
}

async fn post_json(body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/v1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn transforms_request() {
    let body = r#"{
        "sourceJson": {"users": [{"n": "a"}, {"n": "b"}], "total": 2},
        "destinationJsonTemplate": {"count": "{{$total}}", "u": [{"name": "{{$users.*.n}}"}]}
    }"#;
    let (status, response) = post_json(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, r#"{"count":2,"u":[{"name":"a"},{"name":"b"}]}"#);
}

#[tokio::test]
async fn scalar_template() {
    let body = r#"{"sourceJson": {}, "destinationJsonTemplate": "plain"}"#;
    let (status, response) = post_json(body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, r#""plain""#);
}

#[tokio::test]
async fn malformed_body_is_client_error() {
    let (status, _) = post_json(r#"{"sourceJson": {"#).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn missing_field_is_client_error() {
    let (status, _) = post_json(r#"{"sourceJson": {}}"#).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn missing_content_type_is_client_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1")
        .body(Body::from(r#"{"sourceJson": {}, "destinationJsonTemplate": {}}"#))
        .unwrap();
    let response = test_router().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let padding = "x".repeat(8192);
    let body = format!(r#"{{"sourceJson": {{"pad": "{}"}}, "destinationJsonTemplate": {{}}}}"#, padding);
    let (status, _) = post_json(body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = test_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
}

#[test]
fn evaluation_error_is_server_error() {
    let response = ApiError::Evaluation("boom".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
