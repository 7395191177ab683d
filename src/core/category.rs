//! Category business logic.
//!
//! Categories cannot be deleted while products still reference them. The
//! `products.category_id` foreign key has no `ON DELETE` action, so the database
//! refuses the delete.

use crate::{
    core::validation::{NAME_MAX_LEN, required_text},
    entities::{Category, Product, category, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Creates a category after trimming and validating its name.
#[instrument(skip(db))]
pub async fn create_category<C>(db: &C, name: &str) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    let name = required_text("name", name, NAME_MAX_LEN)?;

    let category = category::ActiveModel {
        name: Set(name),
        ..Default::default()
    };
    let category = category.insert(db).await?;
    debug!(id = category.id, "Category created");
    Ok(category)
}

/// Looks up a category by id.
pub async fn get_category_by_id<C>(
    db: &C,
    category_id: i32,
) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every category in creation order.
pub async fn list_categories<C>(db: &C) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renames an existing category.
///
/// # Errors
/// Returns an error if:
/// - The new name is blank or longer than 50 characters
/// - The category does not exist
/// - The database update fails
pub async fn rename_category<C>(
    db: &C,
    category_id: i32,
    new_name: &str,
) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    let new_name = required_text("name", new_name, NAME_MAX_LEN)?;

    let mut category: category::ActiveModel = Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "category",
            id: category_id,
        })?
        .into();

    category.name = Set(new_name);
    category.update(db).await.map_err(Into::into)
}

/// Deletes a category. Fails with a foreign key violation while products remain in it.
#[instrument(skip(db))]
pub async fn delete_category<C>(db: &C, category_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Category::delete_by_id(category_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "category",
            id: category_id,
        });
    }
    Ok(())
}

/// All products listed under a category, in creation order.
pub async fn products_in_category<C>(
    db: &C,
    category_id: i32,
) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
