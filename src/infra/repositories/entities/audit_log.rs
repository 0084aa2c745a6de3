//! Audit log database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{AuditOp, AuditRecord};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub table_name: String,
    pub operation: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AuditRecord {
    fn from(model: Model) -> Self {
        let operation = match model.operation.as_str() {
            "Modified" => AuditOp::Modified,
            "Deleted" => AuditOp::Deleted,
            _ => AuditOp::Added,
        };
        AuditRecord {
            id: model.id,
            table_name: model.table_name,
            operation,
            timestamp: model.timestamp,
        }
    }
}
