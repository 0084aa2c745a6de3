//! Product catalog handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewProduct, Product, ProductChanges, ProductDetail, Tag, TagAssignment};
use crate::errors::AppResult;

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    /// Product name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Laptop")]
    pub name: String,
    /// Units in stock
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    #[schema(example = 10)]
    pub quantity: i32,
    /// Unit price
    pub price: Decimal,
    /// Start of the validity window (defaults to now)
    pub valid_from: Option<chrono::DateTime<chrono::Utc>>,
    /// End of the validity window (defaults to one year from now)
    pub valid_to: Option<chrono::DateTime<chrono::Utc>>,
    /// Optional owned detail record
    pub detail: Option<ProductDetail>,
}

/// Partial product update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
    pub valid_from: Option<chrono::DateTime<chrono::Utc>>,
    pub valid_to: Option<chrono::DateTime<chrono::Utc>>,
    /// A present detail replaces (or creates) the owned record
    pub detail: Option<ProductDetail>,
}

/// Tag assignment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignTagRequest {
    /// Who performed the assignment
    #[validate(length(min = 1, message = "assigned_by is required"))]
    #[schema(example = "System")]
    pub assigned_by: String,
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/tags", get(list_product_tags))
        .route("/:id/tags/:tag_id", post(assign_tag))
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = [Product])
    )
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.services.products.list().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let now = chrono::Utc::now();
    let product = state
        .services
        .products
        .create(NewProduct {
            name: payload.name,
            quantity: payload.quantity,
            price: payload.price,
            valid_from: payload.valid_from.unwrap_or(now),
            valid_to: payload
                .valid_to
                .unwrap_or(now + chrono::Duration::days(365)),
            detail: payload.detail,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get product by id, detail included
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = state.services.products.get(id).await?;
    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<Product>> {
    let product = state
        .services
        .products
        .update(
            id,
            ProductChanges {
                name: payload.name,
                quantity: payload.quantity,
                price: payload.price,
                valid_from: payload.valid_from,
                valid_to: payload.valid_to,
                detail: payload.detail,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the tags assigned to a product
#[utoipa::path(
    get,
    path = "/products/{id}/tags",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Assigned tags", body = [Tag]),
        (status = 404, description = "Product not found")
    )
)]
pub async fn list_product_tags(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Tag>>> {
    if !state.services.products.exists(id).await? {
        return Err(crate::errors::AppError::NotFound);
    }

    let tags = state.services.tags.tags_for_product(id).await?;
    Ok(Json(tags))
}

/// Assign a tag to a product
#[utoipa::path(
    post,
    path = "/products/{id}/tags/{tag_id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "Product id"),
        ("tag_id" = i32, Path, description = "Tag id")
    ),
    request_body = AssignTagRequest,
    responses(
        (status = 201, description = "Tag assigned", body = TagAssignment),
        (status = 404, description = "Product or tag not found"),
        (status = 409, description = "Tag already assigned")
    )
)]
pub async fn assign_tag(
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<AssignTagRequest>,
) -> AppResult<(StatusCode, Json<TagAssignment>)> {
    let assignment = state
        .services
        .tags
        .assign(id, tag_id, payload.assigned_by, chrono::Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}
