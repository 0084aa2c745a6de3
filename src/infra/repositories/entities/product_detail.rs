//! Product detail entity: owned 1:1 record sharing the product's key.

use sea_orm::entity::prelude::*;

use crate::domain::ProductDetail;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product_details")]
pub struct Model {
    /// Primary key and foreign key to the owning product
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i32,
    pub description: Option<String>,
    pub specifications: Option<String>,
    pub manufacturer: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductDetail {
    fn from(model: Model) -> Self {
        ProductDetail {
            description: model.description,
            specifications: model.specifications,
            manufacturer: model.manufacturer,
            image_url: model.image_url,
        }
    }
}
