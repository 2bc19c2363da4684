use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// `GET /dashboard`, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard::page))
}
