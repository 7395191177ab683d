//! Receipt line entity.
//!
//! `price` is copied from the product when the line is written and is never
//! updated afterwards, so later price changes do not rewrite order history.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Receipt line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_details")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Number of units bought
    pub quantity: i32,
    /// Unit price at purchase time
    pub price: f64,
    /// Purchased product
    pub product_id: i32,
    /// Owning receipt
    pub receipt_id: i32,
}

/// Defines relationships between `ReceiptDetails` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line refers to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each line belongs to one receipt
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id",
        on_delete = "Cascade"
    )]
    Receipt,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            quantity: Set(0),
            price: Set(0.0),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}

impl Model {
    /// Quantity times snapshot price
    #[must_use]
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{core::receipt::create_receipt, errors::Result, test_utils::*};

    #[tokio::test]
    async fn test_insert_with_only_references_uses_defaults() -> Result<()> {
        let (db, _category, product) = setup_with_product().await?;
        let user = create_test_user(&db, "buyer").await?;
        let receipt = create_receipt(&db, user.id).await?;

        let detail = ActiveModel {
            product_id: Set(product.id),
            receipt_id: Set(receipt.id),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        assert_eq!(detail.quantity, 0);
        assert_eq!(detail.price, 0.0);
        assert_eq!(detail.line_total(), 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_references_are_rejected() -> Result<()> {
        let (db, _category, product) = setup_with_product().await?;
        let user = create_test_user(&db, "buyer").await?;
        let receipt = create_receipt(&db, user.id).await?;

        // No product
        let result = ActiveModel {
            receipt_id: Set(receipt.id),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(result.is_err());

        // No receipt
        let result = ActiveModel {
            product_id: Set(product.id),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(result.is_err());

        assert_eq!(Entity::find().count(&db).await?, 0);
        Ok(())
    }
}
