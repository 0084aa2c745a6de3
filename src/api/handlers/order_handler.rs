//! Order handlers. Orders are immutable once placed.

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
use crate::domain::{NewOrder, Order, OrderDetails, ShippingAddress};
use crate::errors::{AppError, AppResult};

/// Order placement request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    /// Purchasing user
    pub user_id: i32,
    /// Ordered product
    pub product_id: i32,
    /// Snapshot payload stored as JSON
    pub details: OrderDetails,
    /// Shipping address
    pub shipping_address: ShippingAddress,
}

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).delete(delete_order))
}

/// List all orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "All orders", body = [Order])
    )
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.services.orders.list().await?;
    Ok(Json(orders))
}

/// Place an order
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, description = "Validation error or unknown references")
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    // Check the references up front so the caller gets 400 instead of
    // a constraint violation
    if !state.services.users.exists(payload.user_id).await? {
        return Err(AppError::bad_request("user does not exist"));
    }
    if !state.services.products.exists(payload.product_id).await? {
        return Err(AppError::bad_request("product does not exist"));
    }

    let order = state
        .services
        .orders
        .create(NewOrder {
            user_id: payload.user_id,
            product_id: payload.product_id,
            details: payload.details,
            shipping_address: payload.shipping_address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Get order by id
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Order>> {
    let order = state.services.orders.get(id).await?;
    Ok(Json(order))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
