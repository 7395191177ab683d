//! Tag business logic and the product/tag many-to-many link.
//!
//! Tag names are unique (database constraint). A tag is attached to a product at
//! most once, enforced by the composite primary key of `product_tags`.

use crate::{
    core::validation::{NAME_MAX_LEN, required_text},
    entities::{Product, ProductTag, Tag, product, product_tag, tag},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Creates a tag. A duplicate name fails with a unique constraint violation.
#[instrument(skip(db))]
pub async fn create_tag<C>(db: &C, name: &str) -> Result<tag::Model>
where
    C: ConnectionTrait,
{
    let name = required_text("name", name, NAME_MAX_LEN)?;

    let tag = tag::ActiveModel {
        name: Set(name),
        ..Default::default()
    };
    let tag = tag.insert(db).await?;
    debug!(id = tag.id, "Tag created");
    Ok(tag)
}

/// Looks up a tag by its exact name.
pub async fn get_tag_by_name<C>(db: &C, name: &str) -> Result<Option<tag::Model>>
where
    C: ConnectionTrait,
{
    Tag::find()
        .filter(tag::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all tags alphabetically.
pub async fn list_tags<C>(db: &C) -> Result<Vec<tag::Model>>
where
    C: ConnectionTrait,
{
    Tag::find()
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Attaches a tag to a product.
///
/// Both ids must exist (foreign keys), and attaching the same pair twice
/// violates the primary key of the join table.
#[instrument(skip(db))]
pub async fn attach_tag<C>(db: &C, product_id: i32, tag_id: i32) -> Result<product_tag::Model>
where
    C: ConnectionTrait,
{
    let link = product_tag::ActiveModel {
        product_id: Set(product_id),
        tag_id: Set(tag_id),
    };
    link.insert(db).await.map_err(Into::into)
}

/// Removes a tag from a product. Returns whether a link existed.
pub async fn detach_tag<C>(db: &C, product_id: i32, tag_id: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = ProductTag::delete_by_id((product_id, tag_id)).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Products carrying a tag, in creation order.
pub async fn products_with_tag<C>(db: &C, tag_id: i32) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    let tag = Tag::find_by_id(tag_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "tag",
            id: tag_id,
        })?;
    tag.find_related(Product)
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a tag and, through the cascading key, all of its product links.
pub async fn delete_tag<C>(db: &C, tag_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Tag::delete_by_id(tag_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "tag",
            id: tag_id,
        });
    }
    Ok(())
}
