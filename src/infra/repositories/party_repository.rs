//! Directory party repository.
//!
//! Employees and customers live in one table discriminated by `kind`.
//! The customer email column is encrypted at rest; this repository is
//! the only place the cipher is applied, so callers always see
//! plaintext.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};

use super::entities::party::{self, Entity as PartyEntity, KIND_CUSTOMER, KIND_EMPLOYEE};
use crate::domain::{Party, PartyProfile};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::audit::{self, Change};
use crate::infra::crypto::FieldCipher;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Party repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PartyRepository: Send + Sync {
    /// List all parties ordered by id, emails decrypted
    async fn list(&self) -> AppResult<Vec<Party>>;

    /// Get party by id, email decrypted
    async fn get(&self, id: i32) -> AppResult<Party>;

    /// Create a directory employee
    async fn create_employee(
        &self,
        name: String,
        department: String,
        position: String,
        salary: Decimal,
    ) -> AppResult<Party>;

    /// Create a directory customer; the email is encrypted before it
    /// touches the database
    async fn create_customer(&self, name: String, email: String, phone: String)
        -> AppResult<Party>;

    /// Count all parties
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of PartyRepository
pub struct PartyStore {
    db: DatabaseConnection,
    cipher: Arc<FieldCipher>,
}

impl PartyStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection, cipher: Arc<FieldCipher>) -> Self {
        Self { db, cipher }
    }

    fn to_party(&self, model: party::Model) -> AppResult<Party> {
        let profile = match model.kind.as_str() {
            KIND_EMPLOYEE => PartyProfile::Employee {
                department: model
                    .department
                    .ok_or_else(|| AppError::internal("employee party missing department"))?,
                position: model
                    .position
                    .ok_or_else(|| AppError::internal("employee party missing position"))?,
                salary: model
                    .salary
                    .ok_or_else(|| AppError::internal("employee party missing salary"))?,
            },
            KIND_CUSTOMER => {
                let email_enc = model
                    .email_enc
                    .ok_or_else(|| AppError::internal("customer party missing email"))?;
                PartyProfile::Customer {
                    email: self.cipher.decrypt(&email_enc)?,
                    phone: model
                        .phone
                        .ok_or_else(|| AppError::internal("customer party missing phone"))?,
                }
            }
            other => {
                return Err(AppError::internal(format!("unknown party kind '{other}'")));
            }
        };

        Ok(Party {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            profile,
        })
    }
}

#[async_trait]
impl PartyRepository for PartyStore {
    async fn list(&self) -> AppResult<Vec<Party>> {
        let models = PartyEntity::find()
            .order_by_asc(party::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(|m| self.to_party(m)).collect()
    }

    async fn get(&self, id: i32) -> AppResult<Party> {
        let model = PartyEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        self.to_party(model)
    }

    async fn create_employee(
        &self,
        name: String,
        department: String,
        position: String,
        salary: Decimal,
    ) -> AppResult<Party> {
        let txn = self.db.begin().await?;

        let model = party::ActiveModel {
            name: Set(name),
            created_at: Set(chrono::Utc::now()),
            kind: Set(KIND_EMPLOYEE.to_owned()),
            department: Set(Some(department)),
            position: Set(Some(position)),
            salary: Set(Some(salary)),
            email_enc: Set(None),
            phone: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        audit::record(&txn, &[Change::added::<PartyEntity>()]).await?;
        txn.commit().await?;

        self.to_party(model)
    }

    async fn create_customer(
        &self,
        name: String,
        email: String,
        phone: String,
    ) -> AppResult<Party> {
        let email_enc = self.cipher.encrypt(&email)?;
        let txn = self.db.begin().await?;

        let model = party::ActiveModel {
            name: Set(name),
            created_at: Set(chrono::Utc::now()),
            kind: Set(KIND_CUSTOMER.to_owned()),
            department: Set(None),
            position: Set(None),
            salary: Set(None),
            email_enc: Set(Some(email_enc)),
            phone: Set(Some(phone)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        audit::record(&txn, &[Change::added::<PartyEntity>()]).await?;
        txn.commit().await?;

        self.to_party(model)
    }

    async fn count(&self) -> AppResult<u64> {
        PartyEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
