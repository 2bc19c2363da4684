pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 login (public)
/// /auth/session               current session (requires session)
/// /auth/logout                clear session cookie
///
/// /projects                   list (public), create (requires session)
/// /projects/{id}              get (public), update, delete (requires session)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
}
