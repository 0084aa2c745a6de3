//! Audit recorder for the write pipeline.
//!
//! Every write path declares the set of entities it touches as
//! [`Change`]s and calls [`record`] on the same transaction before
//! committing, so audit rows and data mutations succeed or fail
//! together. Building the rows is a pure function of the change set
//! and a timestamp.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DbErr, EntityName, EntityTrait, Set};

use super::repositories::entities::audit_log;
use crate::domain::AuditOp;

/// One pending change: which table, which operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub table: String,
    pub op: AuditOp,
}

impl Change {
    pub fn added<E: EntityName + Default>() -> Self {
        Self::new::<E>(AuditOp::Added)
    }

    pub fn modified<E: EntityName + Default>() -> Self {
        Self::new::<E>(AuditOp::Modified)
    }

    pub fn deleted<E: EntityName + Default>() -> Self {
        Self::new::<E>(AuditOp::Deleted)
    }

    fn new<E: EntityName + Default>(op: AuditOp) -> Self {
        Self {
            table: E::default().table_name().to_owned(),
            op,
        }
    }
}

/// Build audit rows for a change set. Pure: same input, same output.
pub fn rows(changes: &[Change], at: DateTime<Utc>) -> Vec<audit_log::ActiveModel> {
    changes
        .iter()
        .map(|change| audit_log::ActiveModel {
            table_name: Set(change.table.clone()),
            operation: Set(change.op.as_str().to_owned()),
            timestamp: Set(at),
            ..Default::default()
        })
        .collect()
}

/// Append one audit row per change on the given connection.
///
/// Callers pass the transaction that carries the data mutation itself;
/// this must run before that transaction commits.
pub async fn record<C: ConnectionTrait>(conn: &C, changes: &[Change]) -> Result<(), DbErr> {
    if changes.is_empty() {
        return Ok(());
    }

    audit_log::Entity::insert_many(rows(changes, Utc::now()))
        .exec(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::entities::{product, user};
    use sea_orm::ActiveValue;

    #[test]
    fn test_change_captures_table_name() {
        assert_eq!(Change::added::<product::Entity>().table, "products");
        assert_eq!(Change::modified::<user::Entity>().table, "users");
    }

    #[test]
    fn test_rows_one_per_change() {
        let at = Utc::now();
        let changes = vec![
            Change::added::<product::Entity>(),
            Change::added::<product::Entity>(),
            Change::deleted::<user::Entity>(),
        ];

        let rows = rows(&changes, at);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].operation, ActiveValue::Set("Added".to_owned()));
        assert_eq!(rows[2].operation, ActiveValue::Set("Deleted".to_owned()));
        assert_eq!(rows[2].table_name, ActiveValue::Set("users".to_owned()));
        for row in &rows {
            assert_eq!(row.timestamp, ActiveValue::Set(at));
        }
    }

    #[test]
    fn test_empty_change_set_builds_no_rows() {
        assert!(rows(&[], Utc::now()).is_empty());
    }
}
