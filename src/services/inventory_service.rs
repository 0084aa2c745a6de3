//! Bulk write coordinator and operational queries.
//!
//! Keyed inventory updates run as one transaction regardless of how
//! many batches they span: either every delta lands or none do. The
//! set-based statements (`update_many`/`delete_many`) deliberately
//! skip the audit pipeline, mirroring how direct SQL bypasses entity
//! tracking.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::INVENTORY_BATCH_SIZE;
use crate::domain::{Product, Tag};
use crate::errors::{AppError, AppResult};
use crate::infra::audit::{self, Change};
use crate::infra::repositories::entities::order::{self, Entity as OrderEntity};
use crate::infra::repositories::entities::product::{self, Entity as ProductEntity};
use crate::infra::repositories::entities::product_detail::Entity as DetailEntity;
use crate::infra::repositories::entities::product_tag::Entity as ProductTagEntity;
use crate::infra::repositories::entities::tag::Entity as TagEntity;
use crate::infra::repositories::entities::user::{self, Entity as UserEntity};
use crate::types::{Paginated, PaginationParams};

/// Product plus optionally loaded relations for the conditional
/// eager-loading endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductBundle {
    #[serde(flatten)]
    pub product: Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

/// Connectivity and row-count snapshot.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    pub database: bool,
    pub products: u64,
    pub users: u64,
    pub orders: u64,
}

/// Coordinates bulk writes and reporting queries over the store.
pub struct InventoryService {
    db: DatabaseConnection,
}

impl InventoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Apply signed quantity deltas keyed by product id.
    ///
    /// The whole call is one transaction; batches only bound how many
    /// rows are loaded at once. Ids with no matching product are
    /// skipped. Returns the number of rows updated.
    pub async fn batch_update_inventory(&self, deltas: HashMap<i32, i32>) -> AppResult<u64> {
        if deltas.is_empty() {
            return Ok(0);
        }

        let ids = ordered_ids(&deltas);
        let txn = self.db.begin().await?;

        match Self::apply_deltas(&txn, &ids, &deltas).await {
            Ok(updated) => {
                txn.commit().await?;
                tracing::info!(updated, "bulk inventory update committed");
                Ok(updated)
            }
            Err(err) => {
                tracing::warn!(error = %err, "bulk inventory update rolled back");
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn apply_deltas(
        txn: &DatabaseTransaction,
        ids: &[i32],
        deltas: &HashMap<i32, i32>,
    ) -> AppResult<u64> {
        let now = chrono::Utc::now();
        let mut updated = 0u64;

        for chunk in ids.chunks(INVENTORY_BATCH_SIZE) {
            let models = ProductEntity::find()
                .filter(product::Column::Id.is_in(chunk.to_vec()))
                .all(txn)
                .await
                .map_err(AppError::from)?;

            let mut changes = Vec::with_capacity(models.len());
            for model in models {
                let delta = deltas.get(&model.id).copied().unwrap_or(0);
                let quantity = model.quantity + delta;

                let mut active: product::ActiveModel = model.into();
                active.quantity = Set(quantity);
                active.updated_at = Set(now);
                active.update(txn).await.map_err(AppError::from)?;

                changes.push(Change::modified::<ProductEntity>());
                updated += 1;
            }

            audit::record(txn, &changes).await?;
        }

        Ok(updated)
    }

    /// Adjust every product price by a percentage in one set-based
    /// statement. Bypasses the audit pipeline by construction.
    pub async fn update_prices(&self, percentage: f64) -> AppResult<u64> {
        let factor = Decimal::try_from(1.0 + percentage / 100.0)
            .map_err(|_| AppError::bad_request("percentage is not a representable number"))?;
        if factor < Decimal::ZERO {
            return Err(AppError::bad_request("price adjustment below -100%"));
        }

        let result = ProductEntity::update_many()
            .col_expr(
                product::Column::Price,
                Expr::col(product::Column::Price).mul(factor),
            )
            .col_expr(product::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    /// Delete all orders placed before the cutoff in one set-based
    /// statement. Bypasses the audit pipeline by construction.
    pub async fn delete_orders_before(
        &self,
        cutoff: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<u64> {
        let result = OrderEntity::delete_many()
            .filter(order::Column::OrderedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    /// Opt every active user into the newsletter. Fetch-modify-save in
    /// one transaction so the per-row audit applies; users already
    /// opted in are untouched. Returns the number of rows changed.
    pub async fn opt_in_all_to_newsletter(&self) -> AppResult<u64> {
        let txn = self.db.begin().await?;

        let models = UserEntity::find()
            .filter(user::Column::IsDeleted.eq(false))
            .all(&txn)
            .await
            .map_err(AppError::from)?;

        let mut changes = Vec::new();
        for model in models {
            if model.preferences.0.receive_newsletter {
                continue;
            }

            let mut preferences = model.preferences.clone();
            preferences.0.receive_newsletter = true;

            let mut active: user::ActiveModel = model.into();
            active.preferences = Set(preferences);
            active.update(&txn).await.map_err(AppError::from)?;

            changes.push(Change::modified::<UserEntity>());
        }

        let updated = changes.len() as u64;
        audit::record(&txn, &changes).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// List products with relations loaded on demand, one query per
    /// relation instead of a single join.
    pub async fn products_with_details(
        &self,
        include_details: bool,
        include_tags: bool,
    ) -> AppResult<Vec<ProductBundle>> {
        let models = ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let mut details = HashMap::new();
        if include_details {
            for detail in DetailEntity::find().all(&self.db).await? {
                details.insert(detail.product_id, crate::domain::ProductDetail::from(detail));
            }
        }

        let mut tags_by_product: HashMap<i32, Vec<Tag>> = HashMap::new();
        if include_tags {
            let tags: HashMap<i32, Tag> = TagEntity::find()
                .all(&self.db)
                .await?
                .into_iter()
                .map(|t| (t.id, Tag::from(t)))
                .collect();

            for assignment in ProductTagEntity::find().all(&self.db).await? {
                if let Some(tag) = tags.get(&assignment.tag_id) {
                    tags_by_product
                        .entry(assignment.product_id)
                        .or_default()
                        .push(tag.clone());
                }
            }
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let id = model.id;
                let mut product = Product::from(model);
                product.detail = details.remove(&id);
                ProductBundle {
                    product,
                    tags: include_tags.then(|| tags_by_product.remove(&id).unwrap_or_default()),
                }
            })
            .collect())
    }

    /// Offset pagination over products with a total count.
    pub async fn paginated_products(
        &self,
        params: &PaginationParams,
    ) -> AppResult<Paginated<Product>> {
        let paginator = ProductEntity::find()
            .order_by_asc(product::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok(Paginated::new(
            models.into_iter().map(Product::from).collect(),
            params.page,
            params.limit(),
            total,
        ))
    }

    /// Ping the store and report table counts.
    pub async fn check_health(&self) -> AppResult<HealthReport> {
        self.db.ping().await.map_err(AppError::from)?;

        Ok(HealthReport {
            database: true,
            products: ProductEntity::find().count(&self.db).await?,
            users: UserEntity::find().count(&self.db).await?,
            orders: OrderEntity::find().count(&self.db).await?,
        })
    }
}

/// Sort delta keys so batch membership is deterministic.
fn ordered_ids(deltas: &HashMap<i32, i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = deltas.keys().copied().collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_ids_is_sorted() {
        let deltas = HashMap::from([(9, 1), (2, -3), (5, 0)]);
        assert_eq!(ordered_ids(&deltas), vec![2, 5, 9]);
    }

    #[test]
    fn test_batching_splits_at_the_boundary() {
        let deltas: HashMap<i32, i32> = (1..=250).map(|id| (id, 1)).collect();
        let ids = ordered_ids(&deltas);

        let chunks: Vec<_> = ids.chunks(INVENTORY_BATCH_SIZE).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 100);
        assert_eq!(chunks[2].len(), 50);
        assert_eq!(chunks[0][0], 1);
        assert_eq!(chunks[1][0], 101);
    }
}
