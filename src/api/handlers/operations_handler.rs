//! Operational endpoints: bulk writes, seeding, reporting.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::Product;
use crate::errors::AppResult;
use crate::services::{HealthReport, ProductBundle, SeedSummary};
use crate::types::{MessageResponse, Paginated, PaginatedProducts, PaginationParams};

/// Bulk inventory update request: signed quantity deltas keyed by
/// product id
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InventoryUpdateRequest {
    #[schema(example = json!({"1": 5, "2": -3}))]
    pub deltas: HashMap<i32, i32>,
}

/// Price adjustment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PriceUpdateRequest {
    /// Percentage applied to every price (10 raises by 10%, -10 lowers)
    #[validate(range(min = -100.0, message = "Cannot reduce prices below zero"))]
    #[schema(example = 10.0)]
    pub percentage: f64,
}

/// Cutoff for the order purge
#[derive(Debug, Deserialize, IntoParams)]
pub struct PurgeOrdersParams {
    /// Orders placed strictly before this instant are deleted
    pub before: chrono::DateTime<chrono::Utc>,
}

/// Relation loading switches for the product report
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProductReportParams {
    #[serde(default)]
    pub include_details: bool,
    #[serde(default)]
    pub include_tags: bool,
}

/// Create operations routes
pub fn operations_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(operations_health))
        .route("/seed", post(seed))
        .route("/products", get(paginated_products))
        .route("/product-details", get(product_report))
        .route("/inventory", post(bulk_inventory_update))
        .route("/prices", post(bulk_price_update))
        .route("/orders", delete(purge_orders))
        .route("/newsletter/opt-in", post(newsletter_opt_in))
}

/// Store connectivity and row counts
#[utoipa::path(
    get,
    path = "/operations/health",
    tag = "Operations",
    responses(
        (status = 200, description = "Store health snapshot", body = HealthReport),
        (status = 500, description = "Store unreachable")
    )
)]
pub async fn operations_health(State(state): State<AppState>) -> AppResult<Json<HealthReport>> {
    let report = state.services.inventory.check_health().await?;
    Ok(Json(report))
}

/// Rebuild the reference dataset.
///
/// Seeding is not atomic across steps; failures report what happened
/// rather than mapping to an error status.
#[utoipa::path(
    post,
    path = "/operations/seed",
    tag = "Operations",
    responses(
        (status = 200, description = "Dataset reseeded", body = SeedSummary),
        (status = 500, description = "Seeding failed part-way", body = MessageResponse)
    )
)]
pub async fn seed(
    State(state): State<AppState>,
) -> Result<Json<SeedSummary>, (StatusCode, Json<MessageResponse>)> {
    match state.services.seeder.run().await {
        Ok(summary) => Ok(Json(summary)),
        Err(err) => {
            tracing::error!(error = %err, "seeding failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::failed(format!("seeding failed: {err}"))),
            ))
        }
    }
}

/// One page of products
#[utoipa::path(
    get,
    path = "/operations/products",
    tag = "Operations",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of products", body = PaginatedProducts)
    )
)]
pub async fn paginated_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Product>>> {
    let page = state.services.inventory.paginated_products(&params).await?;
    Ok(Json(page))
}

/// Products with relations loaded on demand
#[utoipa::path(
    get,
    path = "/operations/product-details",
    tag = "Operations",
    params(ProductReportParams),
    responses(
        (status = 200, description = "Products with requested relations", body = [ProductBundle])
    )
)]
pub async fn product_report(
    State(state): State<AppState>,
    Query(params): Query<ProductReportParams>,
) -> AppResult<Json<Vec<ProductBundle>>> {
    let bundles = state
        .services
        .inventory
        .products_with_details(params.include_details, params.include_tags)
        .await?;

    Ok(Json(bundles))
}

/// Apply signed inventory deltas in one transaction
#[utoipa::path(
    post,
    path = "/operations/inventory",
    tag = "Operations",
    request_body = InventoryUpdateRequest,
    responses(
        (status = 200, description = "All deltas applied", body = MessageResponse),
        (status = 500, description = "Rolled back, nothing applied")
    )
)]
pub async fn bulk_inventory_update(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InventoryUpdateRequest>,
) -> AppResult<Json<MessageResponse>> {
    let updated = state
        .services
        .inventory
        .batch_update_inventory(payload.deltas)
        .await?;

    Ok(Json(MessageResponse::ok(format!(
        "updated inventory for {updated} products"
    ))))
}

/// Adjust all prices by a percentage (set-based, not audited)
#[utoipa::path(
    post,
    path = "/operations/prices",
    tag = "Operations",
    request_body = PriceUpdateRequest,
    responses(
        (status = 200, description = "Prices adjusted", body = MessageResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn bulk_price_update(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PriceUpdateRequest>,
) -> AppResult<Json<MessageResponse>> {
    let updated = state
        .services
        .inventory
        .update_prices(payload.percentage)
        .await?;

    Ok(Json(MessageResponse::ok(format!(
        "adjusted prices for {updated} products"
    ))))
}

/// Delete orders placed before a cutoff (set-based, not audited)
#[utoipa::path(
    delete,
    path = "/operations/orders",
    tag = "Operations",
    params(PurgeOrdersParams),
    responses(
        (status = 200, description = "Old orders deleted", body = MessageResponse)
    )
)]
pub async fn purge_orders(
    State(state): State<AppState>,
    Query(params): Query<PurgeOrdersParams>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state
        .services
        .inventory
        .delete_orders_before(params.before)
        .await?;

    Ok(Json(MessageResponse::ok(format!("deleted {deleted} orders"))))
}

/// Opt every active user into the newsletter
#[utoipa::path(
    post,
    path = "/operations/newsletter/opt-in",
    tag = "Operations",
    responses(
        (status = 200, description = "Users opted in", body = MessageResponse)
    )
)]
pub async fn newsletter_opt_in(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    let updated = state.services.inventory.opt_in_all_to_newsletter().await?;

    Ok(Json(MessageResponse::ok(format!(
        "opted {updated} users into the newsletter"
    ))))
}
