//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area. Shared response
//! types and the session guard live here in mod.rs.

mod auth;
mod health;
mod sos;

use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn error_response(
    status: StatusCode,
    message: &str,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

// ── Session guard ────────────────────────────────────────────────

/// Resolve the bearer token to a username, or return 401.
///
/// Every authenticated endpoint goes through this; without a valid
/// session the handler body (and in particular the relay) never runs.
pub(crate) fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            error_response(StatusCode::UNAUTHORIZED, "Missing session token.")
        })?;

    state.sessions.resolve(token).ok_or_else(|| {
        error_response(StatusCode::UNAUTHORIZED, "Invalid or expired session token.")
    })
}

// ── Re-exports ───────────────────────────────────────────────────

pub use auth::{dashboard, login, logout, register};
pub use health::health;
pub use sos::{send_sos, test_connection};
