//! Read-only access to the append-only audit trail.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::entities::audit_log::{self, Entity as AuditLogEntity};
use crate::domain::AuditRecord;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Audit log repository trait for dependency injection.
///
/// Intentionally read-only: rows are appended by the write pipeline
/// and never edited or removed.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// List one page of audit records, newest first, plus the total count
    async fn list_paginated(
        &self,
        params: &PaginationParams,
    ) -> AppResult<(Vec<AuditRecord>, u64)>;

    /// List the records for one table, newest first
    async fn list_for_table(&self, table_name: &str) -> AppResult<Vec<AuditRecord>>;

    /// Count all audit records
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of AuditLogRepository
pub struct AuditLogStore {
    db: DatabaseConnection,
}

impl AuditLogStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditLogRepository for AuditLogStore {
    async fn list_paginated(
        &self,
        params: &PaginationParams,
    ) -> AppResult<(Vec<AuditRecord>, u64)> {
        let paginator = AuditLogEntity::find()
            .order_by_desc(audit_log::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(AuditRecord::from).collect(), total))
    }

    async fn list_for_table(&self, table_name: &str) -> AppResult<Vec<AuditRecord>> {
        let models = AuditLogEntity::find()
            .filter(audit_log::Column::TableName.eq(table_name))
            .order_by_desc(audit_log::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(AuditRecord::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        AuditLogEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
