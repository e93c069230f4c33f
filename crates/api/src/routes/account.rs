//! Account route handlers (require authentication).

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::user::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Current-user response body.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub status: &'static str,
    pub user: User,
}

/// Return the user asserted by the bearer token.
///
/// GET /api/me
///
/// # Errors
///
/// Returns 401 if the token is missing/invalid or the user no longer exists.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<MeResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let user = auth.get_user(user_id).await?;

    Ok(Json(MeResponse {
        status: "success",
        user,
    }))
}
