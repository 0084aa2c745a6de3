//! Directory handlers: employees and customers in one registry.

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
use crate::domain::Party;
use crate::errors::AppResult;

/// Directory employee creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDirectoryEmployeeRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Mark Wilson")]
    pub name: String,
    #[validate(length(min = 1, message = "Department is required"))]
    #[schema(example = "Engineering")]
    pub department: String,
    #[validate(length(min = 1, message = "Position is required"))]
    #[schema(example = "Software Developer")]
    pub position: String,
    pub salary: Decimal,
}

/// Directory customer creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDirectoryCustomerRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Sarah Johnson")]
    pub name: String,
    /// Encrypted at rest, returned as plaintext
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "sarah@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    #[schema(example = "555-123-4567")]
    pub phone: String,
}

/// Create directory routes
pub fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_parties))
        .route("/:id", get(get_party))
        .route("/employees", post(create_directory_employee))
        .route("/customers", post(create_directory_customer))
}

/// List all directory records
#[utoipa::path(
    get,
    path = "/directory",
    tag = "Directory",
    responses(
        (status = 200, description = "All directory records", body = [Party])
    )
)]
pub async fn list_parties(State(state): State<AppState>) -> AppResult<Json<Vec<Party>>> {
    let parties = state.services.parties.list().await?;
    Ok(Json(parties))
}

/// Get directory record by id
#[utoipa::path(
    get,
    path = "/directory/{id}",
    tag = "Directory",
    params(("id" = i32, Path, description = "Party id")),
    responses(
        (status = 200, description = "The directory record", body = Party),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_party(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Party>> {
    let party = state.services.parties.get(id).await?;
    Ok(Json(party))
}

/// Register a directory employee
#[utoipa::path(
    post,
    path = "/directory/employees",
    tag = "Directory",
    request_body = CreateDirectoryEmployeeRequest,
    responses(
        (status = 201, description = "Employee registered", body = Party),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_directory_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDirectoryEmployeeRequest>,
) -> AppResult<(StatusCode, Json<Party>)> {
    let party = state
        .services
        .parties
        .create_employee(payload.name, payload.department, payload.position, payload.salary)
        .await?;

    Ok((StatusCode::CREATED, Json(party)))
}

/// Register a directory customer
#[utoipa::path(
    post,
    path = "/directory/customers",
    tag = "Directory",
    request_body = CreateDirectoryCustomerRequest,
    responses(
        (status = 201, description = "Customer registered", body = Party),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_directory_customer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDirectoryCustomerRequest>,
) -> AppResult<(StatusCode, Json<Party>)> {
    let party = state
        .services
        .parties
        .create_customer(payload.name, payload.email, payload.phone)
        .await?;

    Ok((StatusCode::CREATED, Json(party)))
}
