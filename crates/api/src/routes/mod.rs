//! HTTP route handlers for the Gatehouse API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Welcome payload
//! GET  /health            - Health check (wired in main)
//!
//! # Auth API (JSON)
//! POST /api/register      - Create a new account
//! POST /api/login         - Exchange credentials for a bearer token
//! GET  /api/me            - Current user (requires bearer token)
//! ```

pub mod account;
pub mod auth;

use axum::{
    Json,
    Router,
    routing::{get, post},
};
use serde_json::json;

use crate::state::AppState;

/// Create the auth API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(account::me))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Welcome payload
        .route("/", get(home))
        // Auth API
        .nest("/api", api_routes())
}

/// Welcome payload for the root path.
async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": "Welcome to the Gatehouse API",
    }))
}
