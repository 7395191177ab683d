//! Comment entity - A user's remark on a product.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Comment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    /// Unique identifier for the comment
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Comment text, at most 255 characters
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub content: String,
    /// When the comment was posted
    pub created_date: DateTime,
    /// Author
    pub user_id: i32,
    /// Product being discussed
    pub product_id: i32,
}

/// Defines relationships between Comment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each comment has one author
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each comment is about one product
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

impl ActiveModelBehavior for ActiveModel {
    /// `created_date` defaults to the moment the model is built.
    fn new() -> Self {
        Self {
            created_date: Set(chrono::Utc::now().naive_utc()),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}
