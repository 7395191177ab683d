//! Product/tag join table. Both columns form the primary key, so a tag can be
//! attached to a given product at most once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join row between a product and a tag
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_tags")]
pub struct Model {
    /// Tagged product
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i32,
    /// Applied tag
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i32,
}

/// Both sides of the product/tag link
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Link side pointing at the product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    /// Link side pointing at the tag
    #[sea_orm(
        belongs_to = "super::tag::Entity",
        from = "Column::TagId",
        to = "super::tag::Column::Id",
        on_delete = "Cascade"
    )]
    Tag,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
