#![allow(dead_code)]

use std::sync::{Arc, LazyLock};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio_api::auth::jwt::{generate_access_token, JwtConfig};
use folio_api::auth::password::hash_password;
use folio_api::config::{AdminCredentials, ServerConfig};
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_db::MemoryProjectStore;
use folio_relay::memory::MemorySink;
use folio_storage::memory::MemoryAssetStore;

pub const ADMIN_EMAIL: &str = "owner@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";
pub const ASSET_BASE_URL: &str = "https://cdn.example.com/public";
pub const MULTIPART_BOUNDARY: &str = "folio-test-boundary";

/// Minimal PNG header; enough for content sniffing.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

static ADMIN_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(ADMIN_PASSWORD).expect("hashing should succeed"));

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 1024,
        static_dir: None,
        asset_dir: None,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 60,
        },
        admin: AdminCredentials {
            email: ADMIN_EMAIL.to_string(),
            password_hash: ADMIN_HASH.clone(),
        },
    }
}

/// In-memory backends behind a test app, kept for assertions.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub projects: Arc<MemoryProjectStore>,
    pub assets: Arc<MemoryAssetStore>,
    pub sink: Arc<MemorySink>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Build the full application router with in-memory backends.
    pub fn with_config(config: ServerConfig) -> Self {
        let projects = Arc::new(MemoryProjectStore::new());
        let assets = Arc::new(MemoryAssetStore::new(ASSET_BASE_URL));
        let sink = Arc::new(MemorySink::new());

        let state = AppState {
            config: Arc::new(config.clone()),
            projects: projects.clone(),
            assets: assets.clone(),
            contact_sink: sink.clone(),
        };
        let router = build_app_router(state, &config);

        Self {
            router,
            config,
            projects,
            assets,
            sink,
        }
    }

    /// A valid session token for the configured admin.
    pub fn token(&self) -> String {
        generate_access_token(ADMIN_EMAIL, &self.config.jwt).expect("token generation")
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        "authorization",
        format!("Bearer {token}").parse().unwrap(),
    );
    request
}

/// A multipart body with a `project` JSON part and an optional `image` file.
pub fn multipart_body(project: &serde_json::Value, image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"project\"\r\n\
             Content-Type: application/json\r\n\r\n{project}\r\n"
        )
        .as_bytes(),
    );
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: Method, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
