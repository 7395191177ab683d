//! Product entity - Represents an item in the catalog.
//!
//! Each product belongs to exactly one category, can carry any number of tags
//! through the `product_tags` join table, and is referenced by receipt lines and
//! comments. The `active` flag is stored but only filtered on by the dedicated
//! `list_active_products` query.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Name of the product (e.g., "Mắt biếc")
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub name: String,
    /// Free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Current unit price
    pub price: f64,
    /// Cover image URL
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub image: Option<String>,
    /// Whether the product is offered for sale
    pub active: bool,
    /// ID of the category this product is listed under
    pub category_id: i32,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One product appears on many receipt lines
    #[sea_orm(has_many = "super::receipt_details::Entity")]
    ReceiptDetails,
    /// One product has many comments
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    /// Links to tags through the join table
    #[sea_orm(has_many = "super::product_tag::Entity")]
    ProductTags,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::receipt_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceiptDetails.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_tag::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    /// Unset fields start at price `0` and active.
    fn new() -> Self {
        Self {
            price: Set(0.0),
            active: Set(true),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
