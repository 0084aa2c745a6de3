//! Employee repository with self-referencing manager hierarchy.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entities::employee::{self, Entity as EmployeeEntity};
use crate::domain::Employee;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::audit::{self, Change};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// List all employees ordered by id
    async fn list(&self) -> AppResult<Vec<Employee>>;

    /// Get employee by id
    async fn get(&self, id: i32) -> AppResult<Employee>;

    /// Hire an employee, optionally under a manager
    async fn create(
        &self,
        name: String,
        position: String,
        salary: Decimal,
        manager_id: Option<i32>,
    ) -> AppResult<Employee>;

    /// Update an employee's fields; `manager_id` is taken as-is
    async fn update(
        &self,
        id: i32,
        name: Option<String>,
        position: Option<String>,
        salary: Option<Decimal>,
        manager_id: Option<Option<i32>>,
    ) -> AppResult<Employee>;

    /// Hard delete; fails while direct reports still point here
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// List the direct reports of a manager
    async fn list_reports(&self, manager_id: i32) -> AppResult<Vec<Employee>>;

    /// Check whether an employee exists
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Count all employees
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of EmployeeRepository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn list(&self) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Employee> {
        let model = EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        Ok(Employee::from(model))
    }

    async fn create(
        &self,
        name: String,
        position: String,
        salary: Decimal,
        manager_id: Option<i32>,
    ) -> AppResult<Employee> {
        if let Some(manager_id) = manager_id {
            if !self.exists(manager_id).await? {
                return Err(AppError::validation("manager does not exist"));
            }
        }

        let txn = self.db.begin().await?;

        let model = employee::ActiveModel {
            name: Set(name),
            position: Set(position),
            salary: Set(salary),
            manager_id: Set(manager_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(AppError::from)?;

        audit::record(&txn, &[Change::added::<EmployeeEntity>()]).await?;
        txn.commit().await?;

        Ok(Employee::from(model))
    }

    async fn update(
        &self,
        id: i32,
        name: Option<String>,
        position: Option<String>,
        salary: Option<Decimal>,
        manager_id: Option<Option<i32>>,
    ) -> AppResult<Employee> {
        if let Some(Some(manager_id)) = manager_id {
            if manager_id == id {
                return Err(AppError::validation("employee cannot manage themselves"));
            }
            if !self.exists(manager_id).await? {
                return Err(AppError::validation("manager does not exist"));
            }
        }

        let txn = self.db.begin().await?;

        let model = EmployeeEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_not_found()?;

        let mut active: employee::ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(position) = position {
            active.position = Set(position);
        }
        if let Some(salary) = salary {
            active.salary = Set(salary);
        }
        if let Some(manager_id) = manager_id {
            active.manager_id = Set(manager_id);
        }

        let model = active.update(&txn).await.map_err(AppError::from)?;

        audit::record(&txn, &[Change::modified::<EmployeeEntity>()]).await?;
        txn.commit().await?;

        Ok(Employee::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        // The self-referencing FK restricts deletes; surface the case
        // before it becomes an opaque constraint error.
        let reports = EmployeeEntity::find()
            .filter(employee::Column::ManagerId.eq(id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;
        if reports > 0 {
            return Err(AppError::conflict(
                "employee still has direct reports; reassign them first",
            ));
        }

        let txn = self.db.begin().await?;

        let result = EmployeeEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        audit::record(&txn, &[Change::deleted::<EmployeeEntity>()]).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn list_reports(&self, manager_id: i32) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .filter(employee::Column::ManagerId.eq(manager_id))
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = EmployeeEntity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        EmployeeEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
