//! Registration, login, logout, and the authenticated dashboard view.
//!
//! Auth failures surface as structured JSON errors and never mutate the
//! credential table. Login issues an explicit session token; callers
//! pass it back as a bearer token on every subsequent request.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};

use mayday_core::MaydayError;

use crate::state::AppState;

use super::{error_response, require_session, ErrorResponse};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub username: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, Json<ErrorResponse>)> {
    match state.users.insert(&req.username, &req.password) {
        Ok(()) => {
            tracing::info!(username = %req.username, "User registered");
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse {
                    message: "Registration successful! Please login.",
                }),
            ))
        }
        Err(MaydayError::DuplicateUser(_)) => Err(error_response(
            StatusCode::CONFLICT,
            "Username already exists!",
        )),
        Err(e) => {
            tracing::error!(username = %req.username, error = %e, "Registration failed");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Registration failed.",
            ))
        }
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.users.verify(&req.username, &req.password) {
        Ok(()) => {
            let token = state.sessions.issue(&req.username);
            tracing::info!(username = %req.username, "Login successful");
            Ok(Json(LoginResponse {
                token,
                username: req.username,
                message: "Login successful!",
            }))
        }
        Err(MaydayError::InvalidCredentials) => Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Invalid credentials!",
        )),
        Err(e) => {
            tracing::error!(username = %req.username, error = %e, "Login failed");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Login failed.",
            ))
        }
    }
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let username = require_session(&state, &headers)?;

    // Guard succeeded, so the token is present and valid.
    if let Some(token) = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        state.sessions.revoke(token);
    }

    tracing::info!(username = %username, "Logged out");
    Ok(Json(MessageResponse {
        message: "Logged out successfully!",
    }))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, (StatusCode, Json<ErrorResponse>)> {
    let username = require_session(&state, &headers)?;
    Ok(Json(DashboardResponse { username }))
}
