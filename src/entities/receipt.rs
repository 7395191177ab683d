//! Receipt entity - An order placed by a user. Line items live in `receipt_details`.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Receipt database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    /// Unique identifier for the receipt
    #[sea_orm(primary_key)]
    pub id: i32,
    /// When the receipt was created
    pub created_date: DateTime,
    /// ID of the purchasing user
    pub user_id: i32,
}

/// Defines relationships between Receipt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each receipt belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// One receipt has many line items
    #[sea_orm(has_many = "super::receipt_details::Entity")]
    Details,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::receipt_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            created_date: Set(chrono::Utc::now().naive_utc()),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}
