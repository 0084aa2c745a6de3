//! Order database entity with a JSON details column.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::domain::{Order, OrderDetails, ShippingAddress};

/// JSON column wrapper for the order details document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct OrderDetailsJson(pub OrderDetails);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub ordered_at: DateTimeUtc,
    #[sea_orm(column_type = "Json")]
    pub details: OrderDetailsJson,
    pub ship_line1: String,
    pub ship_city: String,
    pub ship_postal_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(model: Model) -> Self {
        Order {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            ordered_at: model.ordered_at,
            details: model.details.0,
            shipping_address: ShippingAddress {
                line1: model.ship_line1,
                city: model.ship_city,
                postal_code: model.ship_postal_code,
            },
        }
    }
}
