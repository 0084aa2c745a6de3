//! User repository implementation with soft delete support.
//!
//! Soft-deleted rows are excluded only when the caller asks for it via
//! `include_deleted: false`; there is no hidden global filter.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entities::user::{self, Entity as UserEntity, PreferencesJson};
use crate::domain::{User, UserPreferences};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::audit::{self, Change};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users; `include_deleted` also returns soft-deleted rows
    async fn list(&self, include_deleted: bool) -> AppResult<Vec<User>>;

    /// Get user by id; NotFound for soft-deleted rows unless included
    async fn get(&self, id: i32, include_deleted: bool) -> AppResult<User>;

    /// Create a new user
    async fn create(&self, full_name: String, preferences: UserPreferences) -> AppResult<User>;

    /// Update an active user's fields
    async fn update(
        &self,
        id: i32,
        full_name: Option<String>,
        preferences: Option<UserPreferences>,
    ) -> AppResult<User>;

    /// Soft delete: set the flag, keep the row. There is no un-delete.
    async fn soft_delete(&self, id: i32) -> AppResult<()>;

    /// Check whether an active user exists
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Count users; `include_deleted` also counts soft-deleted rows
    async fn count(&self, include_deleted: bool) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository with soft delete
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self, include_deleted: bool) -> AppResult<Vec<User>> {
        let mut query = UserEntity::find().order_by_asc(user::Column::Id);
        if !include_deleted {
            query = query.filter(user::Column::IsDeleted.eq(false));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get(&self, id: i32, include_deleted: bool) -> AppResult<User> {
        let mut query = UserEntity::find_by_id(id);
        if !include_deleted {
            query = query.filter(user::Column::IsDeleted.eq(false));
        }

        let model = query.one(&self.db).await?.ok_or_not_found()?;
        Ok(User::from(model))
    }

    async fn create(&self, full_name: String, preferences: UserPreferences) -> AppResult<User> {
        let txn = self.db.begin().await?;

        let model = user::ActiveModel {
            full_name: Set(full_name),
            is_deleted: Set(false),
            preferences: Set(PreferencesJson(preferences)),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        audit::record(&txn, &[Change::added::<UserEntity>()]).await?;
        txn.commit().await?;

        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: i32,
        full_name: Option<String>,
        preferences: Option<UserPreferences>,
    ) -> AppResult<User> {
        let txn = self.db.begin().await?;

        // Only active users can be edited
        let model = UserEntity::find_by_id(id)
            .filter(user::Column::IsDeleted.eq(false))
            .one(&txn)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        if let Some(full_name) = full_name {
            active.full_name = Set(full_name);
        }
        if let Some(preferences) = preferences {
            active.preferences = Set(PreferencesJson(preferences));
        }

        let model = active.update(&txn).await.map_err(AppError::from)?;

        audit::record(&txn, &[Change::modified::<UserEntity>()]).await?;
        txn.commit().await?;

        Ok(User::from(model))
    }

    async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let model = UserEntity::find_by_id(id)
            .filter(user::Column::IsDeleted.eq(false))
            .one(&txn)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        active.is_deleted = Set(true);
        active.update(&txn).await.map_err(AppError::from)?;

        // The row survives, so the write is a modification
        audit::record(&txn, &[Change::modified::<UserEntity>()]).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = UserEntity::find_by_id(id)
            .filter(user::Column::IsDeleted.eq(false))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn count(&self, include_deleted: bool) -> AppResult<u64> {
        let mut query = UserEntity::find();
        if !include_deleted {
            query = query.filter(user::Column::IsDeleted.eq(false));
        }

        query.count(&self.db).await.map_err(AppError::from)
    }
}
