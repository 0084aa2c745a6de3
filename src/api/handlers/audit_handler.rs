//! Read-only audit trail handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::AuditRecord;
use crate::errors::AppResult;
use crate::types::{Paginated, PaginatedAuditRecords, PaginationParams};

/// Create audit log routes
pub fn audit_routes() -> Router<AppState> {
    Router::new().route("/", get(list_audit_logs))
}

/// List audit records, newest first
#[utoipa::path(
    get,
    path = "/audit-logs",
    tag = "Audit",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of audit records", body = PaginatedAuditRecords)
    )
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<AuditRecord>>> {
    let (records, total) = state.services.audit_logs.list_paginated(&params).await?;

    Ok(Json(Paginated::new(
        records,
        params.page,
        params.limit(),
        total,
    )))
}
