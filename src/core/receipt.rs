//! Receipt business logic - orders and their line items.
//!
//! Each line stores the unit price at the moment it was written. [`checkout`] copies
//! the current product prices for a whole cart inside one database transaction;
//! [`add_receipt_detail`] takes the snapshot price explicitly.

use crate::{
    core::validation,
    entities::{Product, Receipt, ReceiptDetails, receipt, receipt_details},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// One cart line: a product and how many units of it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartItem {
    /// Product being bought
    pub product_id: i32,
    /// Number of units
    pub quantity: i32,
}

/// A receipt together with its line items
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiptWithDetails {
    /// The receipt row
    pub receipt: receipt::Model,
    /// Its lines, in insertion order
    pub details: Vec<receipt_details::Model>,
}

impl ReceiptWithDetails {
    /// Sum of quantity times snapshot price over all lines
    #[must_use]
    pub fn total(&self) -> f64 {
        self.details
            .iter()
            .map(receipt_details::Model::line_total)
            .sum()
    }
}

/// Creates an empty receipt for `user_id`, stamped with the current time.
#[instrument(skip(db))]
pub async fn create_receipt<C>(db: &C, user_id: i32) -> Result<receipt::Model>
where
    C: ConnectionTrait,
{
    let receipt = receipt::ActiveModel {
        created_date: Set(chrono::Utc::now().naive_utc()),
        user_id: Set(user_id),
        ..Default::default()
    };
    receipt.insert(db).await.map_err(Into::into)
}

/// Adds a line to a receipt with an explicit snapshot `price`.
///
/// # Errors
/// Returns an error if:
/// - The quantity is negative
/// - The price is negative or not finite
/// - The receipt or product does not exist (foreign key violation)
#[instrument(skip(db))]
pub async fn add_receipt_detail<C>(
    db: &C,
    receipt_id: i32,
    product_id: i32,
    quantity: i32,
    price: f64,
) -> Result<receipt_details::Model>
where
    C: ConnectionTrait,
{
    let quantity = validation::quantity(quantity)?;
    let price = validation::price("price", price)?;

    let detail = receipt_details::ActiveModel {
        quantity: Set(quantity),
        price: Set(price),
        product_id: Set(product_id),
        receipt_id: Set(receipt_id),
        ..Default::default()
    };
    detail.insert(db).await.map_err(Into::into)
}

/// Turns a cart into a receipt, copying each product's current price.
///
/// Runs in one transaction: if any product is missing or any insert fails, no
/// receipt is left behind.
///
/// # Errors
/// Returns an error if:
/// - The cart is empty or has a negative quantity
/// - A product does not exist
/// - The user does not exist (foreign key violation)
#[instrument(skip(db, items), fields(lines = items.len()))]
pub async fn checkout<C>(
    db: &C,
    user_id: i32,
    items: &[CartItem],
) -> Result<ReceiptWithDetails>
where
    C: ConnectionTrait + TransactionTrait,
{
    if items.is_empty() {
        return Err(Error::validation("cart", "cannot be empty"));
    }
    for item in items {
        validation::quantity(item.quantity)?;
    }

    let txn = db.begin().await?;

    let receipt = create_receipt(&txn, user_id).await?;
    let mut details = Vec::with_capacity(items.len());
    for item in items {
        let product = Product::find_by_id(item.product_id)
            .one(&txn)
            .await?
            .ok_or(Error::NotFound {
                entity: "product",
                id: item.product_id,
            })?;
        let detail =
            add_receipt_detail(&txn, receipt.id, product.id, item.quantity, product.price).await?;
        debug!(product_id = product.id, price = product.price, "Line added");
        details.push(detail);
    }

    txn.commit().await?;

    let checkout = ReceiptWithDetails { receipt, details };
    info!(
        receipt_id = checkout.receipt.id,
        total = checkout.total(),
        "Checkout completed"
    );
    Ok(checkout)
}

/// Looks up a receipt by id.
pub async fn get_receipt_by_id<C>(
    db: &C,
    receipt_id: i32,
) -> Result<Option<receipt::Model>>
where
    C: ConnectionTrait,
{
    Receipt::find_by_id(receipt_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lines of a receipt, in insertion order.
pub async fn receipt_details<C>(
    db: &C,
    receipt_id: i32,
) -> Result<Vec<receipt_details::Model>>
where
    C: ConnectionTrait,
{
    ReceiptDetails::find()
        .filter(receipt_details::Column::ReceiptId.eq(receipt_id))
        .order_by_asc(receipt_details::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sum of quantity times snapshot price for a receipt.
pub async fn receipt_total<C>(db: &C, receipt_id: i32) -> Result<f64>
where
    C: ConnectionTrait,
{
    let details = receipt_details(db, receipt_id).await?;
    Ok(details.iter().map(receipt_details::Model::line_total).sum())
}

/// Receipts of a user, newest first.
pub async fn receipts_for_user<C>(
    db: &C,
    user_id: i32,
) -> Result<Vec<receipt::Model>>
where
    C: ConnectionTrait,
{
    Receipt::find()
        .filter(receipt::Column::UserId.eq(user_id))
        .order_by_desc(receipt::Column::CreatedDate)
        .order_by_desc(receipt::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a receipt; its lines go with it.
#[instrument(skip(db))]
pub async fn delete_receipt<C>(db: &C, receipt_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Receipt::delete_by_id(receipt_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "receipt",
            id: receipt_id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::product::update_product_price;
    use crate::test_utils::*;
    use sea_orm::{PaginatorTrait, SqlErr};

    #[tokio::test]
    async fn test_detail_price_is_a_snapshot() -> Result<()> {
        let (db, _category, product) = setup_with_product().await?;
        let user = create_test_user(&db, "buyer").await?;
        let receipt = create_receipt(&db, user.id).await?;

        let detail = add_receipt_detail(&db, receipt.id, product.id, 2, 110_000.0).await?;
        update_product_price(&db, product.id, 95_000.0).await?;

        let stored = ReceiptDetails::find_by_id(detail.id).one(&db).await?.unwrap();
        assert_eq!(stored.price, 110_000.0);
        assert_eq!(stored.quantity, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_detail_validation() -> Result<()> {
        let (db, _category, product) = setup_with_product().await?;
        let user = create_test_user(&db, "buyer").await?;
        let receipt = create_receipt(&db, user.id).await?;

        let result = add_receipt_detail(&db, receipt.id, product.id, -1, 1.0).await;
        assert!(matches!(result, Err(Error::Validation { field: "quantity", .. })));

        let result = add_receipt_detail(&db, receipt.id, product.id, 1, f64::NAN).await;
        assert!(matches!(result, Err(Error::Validation { field: "price", .. })));

        let err = add_receipt_detail(&db, receipt.id, 999, 1, 1.0)
            .await
            .unwrap_err();
        assert!(matches!(
            err.constraint_violation(),
            Some(SqlErr::ForeignKeyConstraintViolation(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_receipt_for_unknown_user_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(create_receipt(&db, 42).await.is_err());
        assert_eq!(Receipt::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_snapshots_current_prices() -> Result<()> {
        let (db, category, first) = setup_with_product().await?;
        let second = create_custom_product(&db, "Second", 72_250.0, category.id).await?;
        let user = create_test_user(&db, "buyer").await?;

        let order = checkout(
            &db,
            user.id,
            &[
                CartItem {
                    product_id: first.id,
                    quantity: 2,
                },
                CartItem {
                    product_id: second.id,
                    quantity: 1,
                },
            ],
        )
        .await?;

        assert_eq!(order.receipt.user_id, user.id);
        assert_eq!(order.details.len(), 2);
        assert_eq!(order.details[0].price, first.price);
        assert_eq!(order.details[1].price, 72_250.0);
        assert_eq!(order.total(), 2.0 * first.price + 72_250.0);

        // Later price changes leave the receipt alone
        update_product_price(&db, second.id, 1.0).await?;
        assert_eq!(
            receipt_total(&db, order.receipt.id).await?,
            2.0 * first.price + 72_250.0
        );
        assert_eq!(receipt_details(&db, order.receipt.id).await?, order.details);
        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_rolls_back_on_missing_product() -> Result<()> {
        let (db, _category, product) = setup_with_product().await?;
        let user = create_test_user(&db, "buyer").await?;

        let result = checkout(
            &db,
            user.id,
            &[
                CartItem {
                    product_id: product.id,
                    quantity: 1,
                },
                CartItem {
                    product_id: 999,
                    quantity: 1,
                },
            ],
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound { entity: "product", id: 999 })));
        assert_eq!(Receipt::find().count(&db).await?, 0);
        assert_eq!(ReceiptDetails::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "buyer").await?;

        let result = checkout(&db, user.id, &[]).await;
        assert!(matches!(result, Err(Error::Validation { field: "cart", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_receipts_for_user_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "buyer").await?;
        let other = create_test_user(&db, "other").await?;

        let older = create_receipt(&db, user.id).await?;
        let newer = create_receipt(&db, user.id).await?;
        create_receipt(&db, other.id).await?;

        let receipts = receipts_for_user(&db, user.id).await?;
        assert_eq!(receipts, vec![newer.clone(), older]);
        assert_eq!(get_receipt_by_id(&db, newer.id).await?, Some(newer));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_receipt_cascades_details() -> Result<()> {
        let (db, _category, product) = setup_with_product().await?;
        let user = create_test_user(&db, "buyer").await?;
        let order = checkout(
            &db,
            user.id,
            &[CartItem {
                product_id: product.id,
                quantity: 3,
            }],
        )
        .await?;

        delete_receipt(&db, order.receipt.id).await?;

        assert!(get_receipt_by_id(&db, order.receipt.id).await?.is_none());
        assert_eq!(ReceiptDetails::find().count(&db).await?, 0);
        assert!(matches!(
            delete_receipt(&db, order.receipt.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }
}
