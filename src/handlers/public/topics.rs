use axum::extract::{Path, State};

use crate::database::models::TopicView;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /help-center/topics
pub async fn list_topics(State(state): State<AppState>) -> ApiResult<Vec<TopicView>> {
    let topics = state.help_center_service().list_topics().await?;
    Ok(ApiResponse::ok("Topics retrieved successfully", topics))
}

/// GET /help-center/topics/:id
pub async fn get_topic(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<TopicView> {
    let topic = state.help_center_service().get_topic(&id).await?;
    Ok(ApiResponse::ok("Topic retrieved successfully", topic))
}
