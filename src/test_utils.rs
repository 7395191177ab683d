//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::database::{create_connection, create_tables},
    core::{
        category::create_category,
        product::{NewProduct, create_product},
    },
    entities::{UserRole, category, product, user},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// Placeholder stored instead of a real hash, to keep tests that do not log in fast.
pub const TEST_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g";

/// Routes `tracing` output to the test harness; safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = create_connection("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates a test category.
pub async fn create_test_category(db: &DatabaseConnection, name: &str) -> Result<category::Model> {
    create_category(db, name).await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * price: 10.0
/// * active: true
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i32,
) -> Result<product::Model> {
    create_custom_product(db, name, 10.0, category_id).await
}

/// Creates a test product with custom price.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    category_id: i32,
) -> Result<product::Model> {
    create_product(
        db,
        NewProduct {
            price,
            ..NewProduct::new(name, category_id)
        },
    )
    .await
}

/// Inserts a regular user directly, skipping password hashing.
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> Result<user::Model> {
    let user = user::ActiveModel {
        name: Set(format!("Test {username}")),
        username: Set(username.to_string()),
        password: Set(TEST_PASSWORD_HASH.to_string()),
        avatar: Set("https://example.com/avatar.png".to_string()),
        active: Set(true),
        role: Set(UserRole::User),
        ..Default::default()
    };
    user.insert(db).await.map_err(Into::into)
}

/// Sets up a database with one category.
/// Returns (db, category).
pub async fn setup_with_category() -> Result<(DatabaseConnection, category::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Test Category").await?;
    Ok((db, category))
}

/// Sets up a complete test environment with category and product.
/// Returns (db, category, product) for product-related tests.
pub async fn setup_with_product() -> Result<(DatabaseConnection, category::Model, product::Model)>
{
    let (db, category) = setup_with_category().await?;
    let product = create_test_product(&db, "Test Product", category.id).await?;
    Ok((db, category, product))
}
