//! Authentication route handlers.
//!
//! Handles registration and login. Both accept and return JSON; field names
//! are camelCase on the wire.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::user::User;
use crate::services::auth::{AuthService, LoginInput, RegistrationInput};
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub profile_image: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// Registration response body.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user: User,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub token: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle registration.
///
/// POST /api/register
///
/// Returns 201 with the created user on success. The response user carries
/// no password material.
///
/// # Errors
///
/// Returns 400 on validation failure or an already-registered email.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let user = auth
        .register(&RegistrationInput {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
            profile_image: req.profile_image,
        })
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "success",
            message: "Registered successfully",
            user,
        }),
    ))
}

/// Handle login.
///
/// POST /api/login
///
/// Returns 200 with a signed bearer token on success.
///
/// # Errors
///
/// Returns 401 on unknown account or wrong password, indistinguishably.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let (user, token) = auth
        .login(&LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        status: "success",
        message: "Logged in",
        token,
    }))
}
