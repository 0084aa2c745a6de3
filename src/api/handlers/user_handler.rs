//! User management handlers with explicit soft-delete visibility.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Order, User, UserPreferences};
use crate::errors::AppResult;

/// Soft-delete visibility query parameter.
///
/// Deleted rows are invisible unless the caller opts in; there is no
/// hidden global filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct VisibilityParams {
    /// Also return soft-deleted users
    #[serde(default)]
    pub include_deleted: bool,
}

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Full display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "John Smith")]
    pub full_name: String,
    /// Embedded preferences document
    pub preferences: Option<UserPreferences>,
}

/// Partial user update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub full_name: Option<String>,
    pub preferences: Option<UserPreferences>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/orders", get(list_user_orders))
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(VisibilityParams),
    responses(
        (status = 200, description = "Users", body = [User])
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<VisibilityParams>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.services.users.list(params.include_deleted).await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state
        .services
        .users
        .create(payload.full_name, payload.preferences.unwrap_or_default())
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id"), VisibilityParams),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<VisibilityParams>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get(id, params.include_deleted).await?;
    Ok(Json(user))
}

/// Update an active user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    let user = state
        .services
        .users
        .update(id, payload.full_name, payload.preferences)
        .await?;

    Ok(Json(user))
}

/// Soft delete a user. The row stays behind its historical orders;
/// there is no un-delete.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "User soft-deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.users.soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the orders placed by a user (soft-deleted users included, so
/// order history stays reachable)
#[utoipa::path(
    get,
    path = "/users/{id}/orders",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user's orders", body = [Order]),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_orders(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Order>>> {
    // Ensure the user ever existed, deleted or not
    state.services.users.get(id, true).await?;

    let orders = state.services.orders.list_for_user(id).await?;
    Ok(Json(orders))
}
