//! Handlers for the `/auth` resource (login, session, logout).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{clear_session_cookie, generate_access_token, session_cookie};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub email: String,
}

/// The current session, as reported by `GET /auth/session`.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub email: String,
    /// UTC Unix timestamp.
    pub expires_at: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate the administrator. Returns the token in the body and sets the
/// session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let admin = &state.config.admin;
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        ))
    };

    // Verify the password even for an unknown email so both paths cost the same.
    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !admin.matches_email(&input.email) || !password_valid {
        tracing::warn!(email = %input.email, "Rejected dashboard login");
        return Err(invalid());
    }

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(&admin.email, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = jwt.expires_in_secs();

    tracing::info!(email = %admin.email, "Admin signed in");

    let cookie = session_cookie(&access_token, expires_in, state.config.cookie_secure);
    let body = DataResponse {
        data: LoginResponse {
            access_token,
            expires_in,
            email: admin.email.clone(),
        },
    };
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// GET /api/v1/auth/session
pub async fn session(session: AdminSession) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse {
        data: SessionInfo {
            email: session.email,
            expires_at: session.expires_at,
        },
    })
}

/// POST /api/v1/auth/logout
///
/// Sessions are stateless, so this only clears the cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(state.config.cookie_secure))],
    )
}
