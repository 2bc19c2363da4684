//! The client against a live folio API server with in-memory backends.

use std::sync::Arc;

use assert_matches::assert_matches;
use folio_api::auth::jwt::JwtConfig;
use folio_api::auth::password::hash_password;
use folio_api::config::{AdminCredentials, ServerConfig};
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_client::contact::{ContactForm, SubmitError};
use folio_client::dashboard::Dashboard;
use folio_client::{ClientError, FolioClient};
use folio_core::assets::ImageUpload;
use folio_core::contact::ContactMessage;
use folio_db::MemoryProjectStore;
use folio_relay::memory::MemorySink;
use folio_storage::memory::MemoryAssetStore;

const ADMIN_EMAIL: &str = "owner@example.com";
const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

struct Server {
    base_url: String,
    sink: Arc<MemorySink>,
    assets: Arc<MemoryAssetStore>,
}

async fn spawn_server() -> Server {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        max_upload_bytes: 1024 * 1024,
        static_dir: None,
        asset_dir: None,
        cookie_secure: false,
        jwt: JwtConfig {
            secret: "end-to-end-test-secret-long-enough".into(),
            access_token_expiry_mins: 60,
        },
        admin: AdminCredentials {
            email: ADMIN_EMAIL.into(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
        },
    };

    let sink = Arc::new(MemorySink::new());
    let assets = Arc::new(MemoryAssetStore::new("https://cdn.example.com"));
    let state = AppState {
        config: Arc::new(config.clone()),
        projects: Arc::new(MemoryProjectStore::new()),
        assets: assets.clone(),
        contact_sink: sink.clone(),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Server {
        base_url: format!("http://{addr}"),
        sink,
        assets,
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[tokio::test]
async fn contact_form_submits_through_relay() {
    let server = spawn_server().await;
    let client = FolioClient::new(&server.base_url);

    let mut form = ContactForm::new();
    form.set_field("name", "Ada Lovelace");
    form.set_field("email", "ada@example.com");
    form.set_field("subject", "Collaboration");
    form.set_field("message", "I would like to work together.");

    let message = form.submit(&client).await.unwrap();

    assert_eq!(message, "Message sent successfully");
    assert_eq!(server.sink.messages().await.len(), 1);
    assert!(form.values().name.is_empty());

    // Cooldown blocks an immediate second send before any request is made.
    form.set_field("name", "Ada Lovelace");
    form.set_field("email", "ada@example.com");
    form.set_field("subject", "Again");
    form.set_field("message", "A second message right away.");
    assert_matches!(form.submit(&client).await, Err(SubmitError::RateLimited { .. }));
    assert_eq!(server.sink.messages().await.len(), 1);
}

#[tokio::test]
async fn relay_failure_surfaces_server_message() {
    let server = spawn_server().await;
    server.sink.set_offline(true);
    let client = FolioClient::new(&server.base_url);

    let mut form = ContactForm::new();
    form.set_field("name", "Ada Lovelace");
    form.set_field("email", "ada@example.com");
    form.set_field("subject", "Collaboration");
    form.set_field("message", "I would like to work together.");

    let result = form.submit(&client).await;

    assert_eq!(result, Err(SubmitError::Failed("Internal server error".into())));
    assert_eq!(form.values().name, "Ada Lovelace");
}

#[tokio::test]
async fn missing_fields_are_rejected_by_server() {
    let server = spawn_server().await;
    let client = FolioClient::new(&server.base_url);

    let message = ContactMessage {
        name: "Ada".into(),
        ..Default::default()
    };
    let err = client.send_contact(&message).await.unwrap_err();

    assert_matches!(err, ClientError::Api { status: 400, .. });
    assert_eq!(err.user_message(), "All fields are required");
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn writes_require_login() {
    let server = spawn_server().await;
    let client = FolioClient::new(&server.base_url);

    let draft = folio_core::project::ProjectDraft {
        title: "Portfolio".into(),
        ..Default::default()
    };
    let err = client.create_project(&draft, None).await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    let mut client = client;
    let err = client.login(ADMIN_EMAIL, "wrong-password").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(client.token().is_none());
}

#[tokio::test]
async fn dashboard_round_trip() {
    let server = spawn_server().await;
    let mut client = FolioClient::new(&server.base_url);
    let login = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(login.email, ADMIN_EMAIL);
    assert_eq!(client.session().await.unwrap().email, ADMIN_EMAIL);

    let mut dashboard = Dashboard::new(client);
    dashboard.refresh().await.unwrap();
    assert!(dashboard.records().is_empty());

    // Create with an image.
    dashboard.open_create();
    let editor = dashboard.editor_mut().unwrap();
    editor.title = "Portfolio".into();
    editor.tags_text = "react, node, ".into();
    editor.features_text = "Fast\n\nSecure".into();
    editor.github_url = "https://github.com/me/portfolio".into();
    editor.image = Some(ImageUpload::new("cover.png", PNG_BYTES.to_vec()));
    let created = dashboard.save().await.unwrap();

    assert_eq!(created.tags, vec!["react", "node"]);
    assert_eq!(created.features, vec!["Fast", "Secure"]);
    let image_url = created.image_url.clone().unwrap();
    assert!(image_url.starts_with("https://cdn.example.com/projects/"));
    assert_eq!(server.assets.paths().await.len(), 1);
    assert_eq!(dashboard.records().len(), 1);

    // Edit in place without a new image.
    assert!(dashboard.open_edit(created.id));
    dashboard.editor_mut().unwrap().title = "Portfolio v2".into();
    let updated = dashboard.save().await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.image_url.as_deref(), Some(image_url.as_str()));
    assert_eq!(dashboard.records().len(), 1);
    assert_eq!(dashboard.records()[0].title, "Portfolio v2");

    // Delete.
    dashboard.delete(created.id).await.unwrap();
    assert!(dashboard.records().is_empty());
    assert!(server.assets.paths().await.is_empty());
    assert!(dashboard.delete(created.id).await.is_err());
}
