//! Product business logic - Handles all product-related operations.
//!
//! Products are created with [`NewProduct`], whose constructor applies the schema
//! defaults (price `0`, active). The `active` flag is only consulted by
//! [`list_active_products`]; every other query returns inactive products too.

use crate::{
    core::validation::{self, NAME_MAX_LEN, URL_MAX_LEN, required_text},
    entities::{Category, Product, Tag, category, product, tag},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Input for [`create_product`]
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    /// Product name, at most 50 characters
    pub name: String,
    /// Optional long description
    pub description: Option<String>,
    /// Unit price, finite and non-negative
    pub price: f64,
    /// Optional cover image URL, at most 100 characters
    pub image: Option<String>,
    /// Whether the product is offered for sale
    pub active: bool,
    /// Category the product is listed under
    pub category_id: i32,
}

impl NewProduct {
    /// A free, active product with no description or image.
    #[must_use]
    pub fn new(name: impl Into<String>, category_id: i32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price: 0.0,
            image: None,
            active: true,
            category_id,
        }
    }
}

/// Creates a new product, performing input validation.
///
/// The category reference is checked by the database, so a dangling
/// `category_id` surfaces as a foreign key violation.
///
/// # Errors
/// Returns an error if:
/// - The name is blank or too long
/// - The price is negative or not finite (NaN, infinity)
/// - The image URL is too long
/// - The database insert fails (including an unknown category)
#[instrument(skip(db, new_product), fields(name = %new_product.name))]
pub async fn create_product<C>(db: &C, new_product: NewProduct) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let name = required_text("name", &new_product.name, NAME_MAX_LEN)?;
    let price = validation::price("price", new_product.price)?;
    let description = validation::optional_text("description", new_product.description, None)?;
    let image = validation::optional_text("image", new_product.image, Some(URL_MAX_LEN))?;

    let product = product::ActiveModel {
        name: Set(name),
        description: Set(description),
        price: Set(price),
        image: Set(image),
        active: Set(new_product.active),
        category_id: Set(new_product.category_id),
        ..Default::default()
    };
    let product = product.insert(db).await?;
    debug!(id = product.id, "Product created");
    Ok(product)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id<C>(
    db: &C,
    product_id: i32,
) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every product, active or not, in creation order.
pub async fn list_products<C>(db: &C) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists only products whose `active` flag is set, in creation order.
pub async fn list_active_products<C>(db: &C) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::Active.eq(true))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds products whose name contains `keyword`, ordered alphabetically.
pub async fn search_products_by_name<C>(
    db: &C,
    keyword: &str,
) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::Name.contains(keyword.trim()))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_product<C>(db: &C, product_id: i32) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "product",
            id: product_id,
        })
}

/// Changes the current price of a product.
///
/// Receipt lines already written keep the price they were created with.
#[instrument(skip(db))]
pub async fn update_product_price<C>(
    db: &C,
    product_id: i32,
    new_price: f64,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let new_price = validation::price("price", new_price)?;

    let mut product: product::ActiveModel = find_product(db, product_id).await?.into();
    product.price = Set(new_price);
    product.update(db).await.map_err(Into::into)
}

/// Sets or clears the `active` flag of a product.
pub async fn set_product_active<C>(
    db: &C,
    product_id: i32,
    active: bool,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let mut product: product::ActiveModel = find_product(db, product_id).await?.into();
    product.active = Set(active);
    product.update(db).await.map_err(Into::into)
}

/// Deletes a product.
///
/// Tag links are removed with it; receipt lines and comments referencing the
/// product make the delete fail with a foreign key violation.
#[instrument(skip(db))]
pub async fn delete_product<C>(db: &C, product_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Product::delete_by_id(product_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "product",
            id: product_id,
        });
    }
    Ok(())
}

/// Tags attached to a product, alphabetically.
pub async fn tags_for_product<C>(db: &C, product_id: i32) -> Result<Vec<tag::Model>>
where
    C: ConnectionTrait,
{
    let product = find_product(db, product_id).await?;
    product
        .find_related(Tag)
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The category a product is listed under.
pub async fn category_of_product<C>(
    db: &C,
    product: &product::Model,
) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    product
        .find_related(Category)
        .one(db)
        .await
        .map_err(Into::into)
}
