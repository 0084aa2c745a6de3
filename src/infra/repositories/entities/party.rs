//! Party database entity: employees and customers in one table,
//! discriminated by `kind`. The customer email is stored encrypted.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

pub const KIND_EMPLOYEE: &str = "employee";
pub const KIND_CUSTOMER: &str = "customer";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub kind: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<Decimal>,
    /// AES-GCM ciphertext, nonce prefixed
    pub email_enc: Option<Vec<u8>>,
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
