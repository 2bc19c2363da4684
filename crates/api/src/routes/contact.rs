//! Route for the public contact relay, mounted at the root (not under `/api/v1`).

use axum::routing::post;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// `POST /api/contactus`; every other method gets a 405 JSON body.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/contactus",
        post(contact::submit).fallback(contact::method_not_allowed),
    )
}
