//! Authentication handlers

use axum::{Json, extract::State};

use shared::client::{LoginRequest, LoginResponse};
use shared::models::EmployeeView;

use crate::auth::AuthContext;
use crate::core::ServerState;
use crate::utils::AppResult;

/// Login handler
///
/// Authenticates credentials and returns a JWT with a redacted user view.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.employees.login(&req.email, &req.password).await?;
    Ok(Json(response))
}

/// Current user info
pub async fn me(
    State(state): State<ServerState>,
    AuthContext(user): AuthContext,
) -> AppResult<Json<EmployeeView>> {
    let view = state.employees.me(user.as_ref()).await?;
    Ok(Json(view))
}
