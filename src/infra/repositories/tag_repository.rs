//! Tag repository: tags plus their product assignments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entities::product::Entity as ProductEntity;
use super::entities::product_tag::{self, Entity as ProductTagEntity};
use super::entities::tag::{self, Entity as TagEntity};
use crate::domain::{Tag, TagAssignment};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::audit::{self, Change};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Tag repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// List all tags ordered by id
    async fn list(&self) -> AppResult<Vec<Tag>>;

    /// Get tag by id
    async fn get(&self, id: i32) -> AppResult<Tag>;

    /// Find a tag by its unique name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Tag>>;

    /// Create a tag; Conflict when the name is taken
    async fn create(&self, name: String) -> AppResult<Tag>;

    /// Hard delete a tag (assignments cascade)
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Assign a tag to a product, stamping who did it and when
    async fn assign(
        &self,
        product_id: i32,
        tag_id: i32,
        assigned_by: String,
        assigned_on: DateTime<Utc>,
    ) -> AppResult<TagAssignment>;

    /// List the tags assigned to a product
    async fn tags_for_product(&self, product_id: i32) -> AppResult<Vec<Tag>>;

    /// Count all tags
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of TagRepository
pub struct TagStore {
    db: DatabaseConnection,
}

impl TagStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for TagStore {
    async fn list(&self) -> AppResult<Vec<Tag>> {
        let models = TagEntity::find()
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Tag> {
        let model = TagEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        Ok(Tag::from(model))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Tag>> {
        let model = TagEntity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(Tag::from))
    }

    async fn create(&self, name: String) -> AppResult<Tag> {
        if self.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(format!("tag '{name}' already exists")));
        }

        let txn = self.db.begin().await?;

        let model = tag::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        audit::record(&txn, &[Change::added::<TagEntity>()]).await?;
        txn.commit().await?;

        Ok(Tag::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = TagEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        audit::record(&txn, &[Change::deleted::<TagEntity>()]).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn assign(
        &self,
        product_id: i32,
        tag_id: i32,
        assigned_by: String,
        assigned_on: DateTime<Utc>,
    ) -> AppResult<TagAssignment> {
        // Both ends must exist; the join table FKs would reject the
        // insert anyway but NotFound reads better than a raw DB error.
        let product_exists = ProductEntity::find_by_id(product_id).count(&self.db).await? > 0;
        let tag_exists = TagEntity::find_by_id(tag_id).count(&self.db).await? > 0;
        if !product_exists || !tag_exists {
            return Err(AppError::NotFound);
        }

        let already = ProductTagEntity::find_by_id((product_id, tag_id))
            .one(&self.db)
            .await?;
        if already.is_some() {
            return Err(AppError::conflict("tag is already assigned to product"));
        }

        let txn = self.db.begin().await?;

        let model = product_tag::ActiveModel {
            product_id: Set(product_id),
            tag_id: Set(tag_id),
            assigned_on: Set(assigned_on),
            assigned_by: Set(assigned_by),
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        audit::record(&txn, &[Change::added::<ProductTagEntity>()]).await?;
        txn.commit().await?;

        Ok(TagAssignment::from(model))
    }

    async fn tags_for_product(&self, product_id: i32) -> AppResult<Vec<Tag>> {
        let assignments = ProductTagEntity::find()
            .filter(product_tag::Column::ProductId.eq(product_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let tag_ids: Vec<i32> = assignments.iter().map(|a| a.tag_id).collect();
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = TagEntity::find()
            .filter(tag::Column::Id.is_in(tag_ids))
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        TagEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
