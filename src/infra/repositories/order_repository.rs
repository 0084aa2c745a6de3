//! Order repository. Orders are immutable once placed; only create,
//! read and hard delete are exposed.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entities::order::{self, Entity as OrderEntity, OrderDetailsJson};
use crate::domain::{NewOrder, Order};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::audit::{self, Change};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Order repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List all orders ordered by id
    async fn list(&self) -> AppResult<Vec<Order>>;

    /// Get order by id
    async fn get(&self, id: i32) -> AppResult<Order>;

    /// List the orders placed by one user
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Order>>;

    /// Place an order
    async fn create(&self, new: NewOrder) -> AppResult<Order>;

    /// Hard delete an order
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Count all orders
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of OrderRepository
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn list(&self) -> AppResult<Vec<Order>> {
        let models = OrderEntity::find()
            .order_by_asc(order::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Order::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Order> {
        let model = OrderEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        Ok(Order::from(model))
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Order>> {
        let models = OrderEntity::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_asc(order::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Order::from).collect())
    }

    async fn create(&self, new: NewOrder) -> AppResult<Order> {
        let txn = self.db.begin().await?;

        let model = order::ActiveModel {
            user_id: Set(new.user_id),
            product_id: Set(new.product_id),
            ordered_at: Set(chrono::Utc::now()),
            details: Set(OrderDetailsJson(new.details)),
            ship_line1: Set(new.shipping_address.line1),
            ship_city: Set(new.shipping_address.city),
            ship_postal_code: Set(new.shipping_address.postal_code),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        audit::record(&txn, &[Change::added::<OrderEntity>()]).await?;
        txn.commit().await?;

        Ok(Order::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = OrderEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        audit::record(&txn, &[Change::deleted::<OrderEntity>()]).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        OrderEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
