//! Audit log domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{AUDIT_OP_ADDED, AUDIT_OP_DELETED, AUDIT_OP_MODIFIED};

/// Kind of mutation an audit row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AuditOp {
    Added,
    Modified,
    Deleted,
}

impl AuditOp {
    /// Label persisted in the `operation` column
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOp::Added => AUDIT_OP_ADDED,
            AuditOp::Modified => AUDIT_OP_MODIFIED,
            AuditOp::Deleted => AUDIT_OP_DELETED,
        }
    }
}

impl std::fmt::Display for AuditOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit row: which table, which operation, when.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditRecord {
    pub id: i32,
    pub table_name: String,
    pub operation: AuditOp,
    pub timestamp: DateTime<Utc>,
}
