use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::database::models::TopicView;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{CreateHelpCenterTopicDto, TopicAction, UpdateHelpCenterTopicDto};
use crate::state::AppState;

/// POST /help-center/topics
///
/// The role check runs before the body is parsed, so callers without the
/// super-admin role get 403 whatever they send.
pub async fn create_topic(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<CreateHelpCenterTopicDto>, JsonRejection>,
) -> ApiResult<TopicView> {
    let service = state.help_center_service();
    service.ensure_super_admin(&auth, TopicAction::Create)?;

    let Json(dto) = body?;
    let topic = service.create_topic(dto, &auth).await?;
    Ok(ApiResponse::created("Topic created successfully", topic))
}

/// PATCH /help-center/topics/:id
pub async fn update_topic(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<UpdateHelpCenterTopicDto>, JsonRejection>,
) -> ApiResult<TopicView> {
    let service = state.help_center_service();
    service.ensure_super_admin(&auth, TopicAction::Update)?;

    let Json(dto) = body?;
    let topic = service.update_topic(&id, dto, &auth).await?;
    Ok(ApiResponse::ok("Topic updated successfully", topic))
}

/// DELETE /help-center/topics/:id
pub async fn delete_topic(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.help_center_service().delete_topic(&id, &auth).await?;
    Ok(ApiResponse::ok("Topic deleted successfully", ()))
}
