//! Product repository with owned detail record handling.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::product::{self, Entity as ProductEntity};
use super::entities::product_detail::{self, Entity as DetailEntity};
use crate::domain::{NewProduct, Product, ProductChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::audit::{self, Change};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List all products ordered by id (details not loaded)
    async fn list(&self) -> AppResult<Vec<Product>>;

    /// List one page of products plus the total count
    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)>;

    /// Get product by id, detail included
    async fn get(&self, id: i32) -> AppResult<Product>;

    /// Fetch the products whose ids appear in `ids`; missing ids are skipped
    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Product>>;

    /// Create a product (and its detail, when present)
    async fn create(&self, new: NewProduct) -> AppResult<Product>;

    /// Apply a partial update; a present detail replaces the owned record
    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<Product>;

    /// Hard delete a product (detail and tag assignments cascade)
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Check whether a product exists
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Count all products
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn list(&self) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)> {
        let paginator = ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Product::from).collect(), total))
    }

    async fn get(&self, id: i32) -> AppResult<Product> {
        let model = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let detail = model
            .find_related(DetailEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let mut result = Product::from(model);
        result.detail = detail.map(Into::into);
        Ok(result)
    }

    async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = ProductEntity::find()
            .filter(product::Column::Id.is_in(ids))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn create(&self, new: NewProduct) -> AppResult<Product> {
        Product::check_window(new.valid_from, new.valid_to)?;

        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let model = product::ActiveModel {
            name: Set(new.name),
            quantity: Set(new.quantity),
            price: Set(new.price),
            created_at: Set(now),
            updated_at: Set(now),
            valid_from: Set(new.valid_from),
            valid_to: Set(new.valid_to),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        let mut changes = vec![Change::added::<ProductEntity>()];

        let detail = match new.detail {
            Some(detail) => {
                let detail_model = product_detail::ActiveModel {
                    product_id: Set(model.id),
                    description: Set(detail.description),
                    specifications: Set(detail.specifications),
                    manufacturer: Set(detail.manufacturer),
                    image_url: Set(detail.image_url),
                }
                .insert(&txn)
                .await
                .map_err(AppError::from)?;
                changes.push(Change::added::<DetailEntity>());
                Some(detail_model.into())
            }
            None => None,
        };

        audit::record(&txn, &changes).await?;
        txn.commit().await?;

        let mut result = Product::from(model);
        result.detail = detail;
        Ok(result)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> AppResult<Product> {
        let txn = self.db.begin().await?;

        let model = ProductEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_not_found()?;

        let valid_from = changes.valid_from.unwrap_or(model.valid_from);
        let valid_to = changes.valid_to.unwrap_or(model.valid_to);
        Product::check_window(valid_from, valid_to)?;

        let mut active: product::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(quantity) = changes.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        active.valid_from = Set(valid_from);
        active.valid_to = Set(valid_to);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&txn).await.map_err(AppError::from)?;
        let mut audited = vec![Change::modified::<ProductEntity>()];

        let detail = match changes.detail {
            Some(detail) => {
                let existing = DetailEntity::find_by_id(id).one(&txn).await?;
                let detail_model = match existing {
                    Some(existing) => {
                        let mut active: product_detail::ActiveModel = existing.into();
                        active.description = Set(detail.description);
                        active.specifications = Set(detail.specifications);
                        active.manufacturer = Set(detail.manufacturer);
                        active.image_url = Set(detail.image_url);
                        audited.push(Change::modified::<DetailEntity>());
                        active.update(&txn).await.map_err(AppError::from)?
                    }
                    None => {
                        audited.push(Change::added::<DetailEntity>());
                        product_detail::ActiveModel {
                            product_id: Set(id),
                            description: Set(detail.description),
                            specifications: Set(detail.specifications),
                            manufacturer: Set(detail.manufacturer),
                            image_url: Set(detail.image_url),
                        }
                        .insert(&txn)
                        .await
                        .map_err(AppError::from)?
                    }
                };
                Some(detail_model.into())
            }
            None => DetailEntity::find_by_id(id).one(&txn).await?.map(Into::into),
        };

        audit::record(&txn, &audited).await?;
        txn.commit().await?;

        let mut result = Product::from(model);
        result.detail = detail;
        Ok(result)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = ProductEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        audit::record(&txn, &[Change::deleted::<ProductEntity>()]).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = ProductEntity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        ProductEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
