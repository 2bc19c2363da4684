//! Integration tests for `POST /api/contactus`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_request, json_request, TestApp};
use serde_json::json;

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "subject": "Collaboration",
        "message": "I would like to work together on a project.",
    })
}

// ---------------------------------------------------------------------------
// Success
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_message_is_relayed_once() {
    let app = TestApp::new();
    let response = app
        .send(json_request(Method::POST, "/api/contactus", valid_body()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Message sent successfully");
    assert!(json.get("errors").is_none());

    let delivered = app.sink.messages().await;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].email, "ada@example.com");
}

#[tokio::test]
async fn relayed_message_is_trimmed() {
    let app = TestApp::new();
    let mut body = valid_body();
    body["name"] = json!("  Ada  ");

    let response = app
        .send(json_request(Method::POST, "/api/contactus", body))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.sink.messages().await[0].name, "Ada");
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_field_returns_400() {
    let app = TestApp::new();
    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("subject");

    let response = app
        .send(json_request(Method::POST, "/api/contactus", body))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "All fields are required");
    assert!(app.sink.messages().await.is_empty());
}

#[tokio::test]
async fn blank_field_counts_as_missing() {
    let app = TestApp::new();
    let mut body = valid_body();
    body["message"] = json!("   ");

    let response = app
        .send(json_request(Method::POST, "/api/contactus", body))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "All fields are required");
}

#[tokio::test]
async fn invalid_fields_return_error_map() {
    let app = TestApp::new();
    let mut body = valid_body();
    body["email"] = json!("not-an-email");
    body["message"] = json!("too short");

    let response = app
        .send(json_request(Method::POST, "/api/contactus", body))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"]["email"], "Please enter a valid email address");
    assert_eq!(
        json["errors"]["message"],
        "Message must be between 10 and 1000 characters"
    );
    assert!(json["errors"].get("name").is_none());
    assert!(app.sink.messages().await.is_empty());
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/contactus")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[tokio::test]
async fn other_methods_return_405_json() {
    let app = TestApp::new();

    let response = app.send(get_request("/api/contactus")).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Method not allowed");
    assert_eq!(json["success"], false);

    let response = app
        .send(json_request(Method::PUT, "/api/contactus", valid_body()))
        .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(app.sink.messages().await.is_empty());
}

#[tokio::test]
async fn sink_failure_returns_500() {
    let app = TestApp::new();
    app.sink.set_offline(true);

    let response = app
        .send(json_request(Method::POST, "/api/contactus", valid_body()))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Internal server error");
}
