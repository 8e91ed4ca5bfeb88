use axum::extract::State;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - service information
pub async fn root() -> ApiResult<Value> {
    Ok(ApiResponse::ok(
        "Welcome to the OrgDesk API",
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/health (public)",
                "auth": "/auth/register, /auth/login (public)",
                "users": "/users[/:id], /users/deactivate (protected)",
                "help_center": "/help-center/topics[/:id] (reads public, writes protected)",
            }
        }),
    ))
}

/// GET /health - 200 when the database answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    match state.users.ping().await {
        Ok(()) => Ok(ApiResponse::ok(
            "Service is healthy",
            json!({
                "status": "ok",
                "timestamp": Utc::now(),
                "database": "ok",
            }),
        )),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("Database unavailable"))
        }
    }
}
