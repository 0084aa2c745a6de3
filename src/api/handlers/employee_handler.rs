//! Employee hierarchy handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::Employee;
use crate::errors::AppResult;

/// Employee creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Alice Johnson")]
    pub name: String,
    #[validate(length(min = 1, message = "Position is required"))]
    #[schema(example = "CTO")]
    pub position: String,
    pub salary: Decimal,
    /// Manager, omitted for roots of the hierarchy
    pub manager_id: Option<i32>,
}

/// Partial employee update request.
///
/// `manager_id` distinguishes "leave unchanged" (absent) from "detach
/// from manager" (explicit null) via the double Option.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Position cannot be empty"))]
    pub position: Option<String>,
    pub salary: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>, nullable)]
    pub manager_id: Option<Option<i32>>,
}

/// Map a present field (including an explicit null) to `Some`, so an
/// absent field stays `None`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/:id/reports", get(list_reports))
}

/// List all employees
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "All employees", body = [Employee])
    )
)]
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.services.employees.list().await?;
    Ok(Json(employees))
}

/// Hire an employee
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error or unknown manager")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let employee = state
        .services
        .employees
        .create(payload.name, payload.position, payload.salary, payload.manager_id)
        .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Get employee by id
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "The employee", body = Employee),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Employee>> {
    let employee = state.services.employees.get(id).await?;
    Ok(Json(employee))
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Updated employee", body = Employee),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<Json<Employee>> {
    let employee = state
        .services
        .employees
        .update(
            id,
            payload.name,
            payload.position,
            payload.salary,
            payload.manager_id,
        )
        .await?;

    Ok(Json(employee))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee still has direct reports")
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the direct reports of an employee
#[utoipa::path(
    get,
    path = "/employees/{id}/reports",
    tag = "Employees",
    params(("id" = i32, Path, description = "Manager id")),
    responses(
        (status = 200, description = "Direct reports", body = [Employee]),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Employee>>> {
    if !state.services.employees.exists(id).await? {
        return Err(crate::errors::AppError::NotFound);
    }

    let reports = state.services.employees.list_reports(id).await?;
    Ok(Json(reports))
}
