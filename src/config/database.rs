//! Database configuration module.
//!
//! This module handles the database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the foreign keys, the unique tag name and the composite key of the product/tag join
//! table all come straight from the Rust models. The only hand-written piece is the CHECK
//! constraint that pins `users.role` to the values of [`UserRole`].

use crate::entities::{
    Category, Comment, Product, ProductTag, Receipt, ReceiptDetails, Tag, User, UserRole, user,
};
use crate::errors::Result;
use sea_orm::{
    ActiveEnum, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Iterable, Schema,
    sea_query::{Expr, TableCreateStatement},
};
use tracing::{debug, info, instrument};

/// Used when neither `DATABASE_URL` nor the config file names a database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/banhang.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
///
/// On `SQLite` foreign key enforcement is switched on explicitly, since referential
/// integrity is the main thing this schema promises.
#[instrument(skip(database_url))]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite {
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    }

    info!(backend = ?db.get_database_backend(), "Database connection opened");
    Ok(db)
}

/// Builds the `CREATE TABLE` statements in dependency order (referenced tables first).
fn table_statements(schema: &Schema) -> Vec<TableCreateStatement> {
    let mut users = schema.create_table_from_entity(User);
    users.check(Expr::col(user::Column::Role).is_in(UserRole::iter().map(|role| role.to_value())));

    vec![
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(Tag),
        users,
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(ProductTag),
        schema.create_table_from_entity(Receipt),
        schema.create_table_from_entity(ReceiptDetails),
        schema.create_table_from_entity(Comment),
    ]
}

/// Creates all tables that do not exist yet.
///
/// Safe to call on every start; existing tables and their rows are left alone.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    for mut statement in table_statements(&schema) {
        statement.if_not_exists();
        let stmt = builder.build(&statement);
        debug!(sql = %stmt.sql, "Creating table");
        db.execute(stmt).await?;
    }

    info!("Database tables ensured");
    Ok(())
}
