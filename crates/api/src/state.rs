use std::sync::Arc;

use folio_db::ProjectStore;
use folio_relay::ContactSink;
use folio_storage::AssetStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Backends sit behind trait objects so tests can swap in the in-memory ones.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Authoritative project collection.
    pub projects: Arc<dyn ProjectStore>,
    /// Blob storage for project images.
    pub assets: Arc<dyn AssetStore>,
    /// Destination for contact form messages.
    pub contact_sink: Arc<dyn ContactSink>,
}
