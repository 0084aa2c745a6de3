//! Tag management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::Tag;
use crate::errors::AppResult;

/// Tag creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTagRequest {
    /// Tag name, unique across the catalog
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "electronics")]
    pub name: String,
}

/// Create tag routes
pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/:id", get(get_tag).delete(delete_tag))
}

/// List all tags
#[utoipa::path(
    get,
    path = "/tags",
    tag = "Tags",
    responses(
        (status = 200, description = "All tags", body = [Tag])
    )
)]
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    let tags = state.services.tags.list().await?;
    Ok(Json(tags))
}

/// Create a new tag
#[utoipa::path(
    post,
    path = "/tags",
    tag = "Tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Tag name already taken")
    )
)]
pub async fn create_tag(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateTagRequest>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let tag = state.services.tags.create(payload.name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Get tag by id
#[utoipa::path(
    get,
    path = "/tags/{id}",
    tag = "Tags",
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 200, description = "The tag", body = Tag),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn get_tag(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Tag>> {
    let tag = state.services.tags.get(id).await?;
    Ok(Json(tag))
}

/// Delete a tag
#[utoipa::path(
    delete,
    path = "/tags/{id}",
    tag = "Tags",
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.tags.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
