use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{DeactivateAccountDto, DeactivatedUser, UpdateUserDto, UpdatedUser, UserDetails, UserList};
use crate::state::AppState;
use crate::types::PageQuery;

/// GET /users?page=&limit= - super admins only
pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<UserList> {
    let Query(query) = query?;
    let users = state.user_service().get_users_by_admin(query, &auth).await?;
    Ok(ApiResponse::ok("Users retrieved successfully", users))
}

/// GET /users/:id
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserDetails> {
    let user = state.user_service().get_user_data_without_password_by_id(&id).await?;
    Ok(ApiResponse::ok("User retrieved successfully", user))
}

/// PATCH /users/:id - the user themself or a super admin
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserDto>, JsonRejection>,
) -> ApiResult<UpdatedUser> {
    let Json(dto) = body?;
    let updated = state.user_service().update_user(&id, dto, &auth).await?;
    Ok(ApiResponse::ok("User Updated Successfully", updated))
}

/// PATCH /users/deactivate - deactivates the caller's own account
pub async fn deactivate_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<DeactivateAccountDto>, JsonRejection>,
) -> ApiResult<DeactivatedUser> {
    let Json(dto) = body?;
    let result = state
        .user_service()
        .deactivate_user(&auth.id.to_string(), dto)
        .await?;
    Ok(ApiResponse::ok("Account Deactivated Successfully", result))
}
