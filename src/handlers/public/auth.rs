// handlers/public/auth.rs - token acquisition

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{AuthPayload, LoginDto, RegisterDto};
use crate::state::AppState;

/// POST /auth/register - create a regular user account and return a token
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterDto>, JsonRejection>,
) -> ApiResult<AuthPayload> {
    let Json(dto) = body?;
    let payload = state.auth_service().register(dto).await?;
    Ok(ApiResponse::created("User registered successfully", payload))
}

/// POST /auth/login - exchange email and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginDto>, JsonRejection>,
) -> ApiResult<AuthPayload> {
    let Json(dto) = body?;
    let payload = state.auth_service().login(dto).await?;
    Ok(ApiResponse::ok("Login successful", payload))
}
