//! Session extractors for admin-only handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::response::Redirect;
use folio_core::error::CoreError;

use crate::auth::jwt::{validate_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated administrator.
///
/// The token is read from `Authorization: Bearer <token>` or, failing that,
/// from the `folio_session` cookie. Rejects with 401.
///
/// ```ignore
/// async fn my_handler(session: AdminSession) -> AppResult<Json<()>> {
///     tracing::info!(email = %session.email, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub email: String,
    /// Token expiry (UTC Unix timestamp).
    pub expires_at: i64,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts)?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        // A token minted for a previous admin email is no longer valid.
        if !state.config.admin.matches_email(&claims.sub) {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired session".into(),
            )));
        }

        Ok(AdminSession {
            email: claims.sub,
            expires_at: claims.exp,
        })
    }
}

/// [`AdminSession`] for page routes: a missing or invalid session redirects
/// to the public home page (303) instead of returning 401 JSON.
#[derive(Debug, Clone)]
pub struct DashboardSession(pub AdminSession);

impl FromRequestParts<AppState> for DashboardSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AdminSession::from_request_parts(parts, state)
            .await
            .map(DashboardSession)
            .map_err(|_| Redirect::to("/"))
    }
}

/// Pull the raw session token from the request.
fn session_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let value = header.to_str().unwrap_or_default();
        return value
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            });
    }

    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not signed in".into())))
}
