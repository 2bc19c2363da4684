//! The admin dashboard page.

use std::path::Path;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::handlers::auth::SessionInfo;
use crate::middleware::auth::DashboardSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// File served for `/dashboard` from the static directory.
pub const DASHBOARD_PAGE: &str = "dashboard.html";

/// GET /dashboard
///
/// Serves the dashboard page when a static directory with `dashboard.html`
/// is configured; otherwise reports the session as JSON. Without a session
/// the [`DashboardSession`] extractor redirects to `/`.
pub async fn page(
    DashboardSession(session): DashboardSession,
    State(state): State<AppState>,
) -> Response {
    if let Some(dir) = &state.config.static_dir {
        let page = Path::new(dir).join(DASHBOARD_PAGE);
        match tokio::fs::read_to_string(&page).await {
            Ok(html) => return Html(html).into_response(),
            Err(e) => {
                tracing::debug!(path = %page.display(), error = %e, "Dashboard page not found");
            }
        }
    }

    Json(DataResponse {
        data: SessionInfo {
            email: session.email,
            expires_at: session.expires_at,
        },
    })
    .into_response()
}
