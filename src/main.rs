//! Bootstrap entry point: creates the schema and seeds the demo catalogue.
//!
//! Takes no arguments. Run it once against an empty database; running it again
//! inserts the demo rows a second time.

use banhang::{
    config::{
        self,
        database::{create_connection, create_tables},
    },
    core::seed::seed_demo_data,
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!(locale = app_config.select_locale(), "Configuration loaded");

    // 4. Connect and create tables
    let db = create_connection(&app_config.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed demo data
    let summary = seed_demo_data(&db, &app_config.seed)
        .await
        .inspect_err(|e| error!("Seeding stopped part-way: {}", e))?;
    info!(
        categories = summary.categories,
        products = summary.products,
        users = summary.users,
        comments = summary.comments,
        "Demo data seeded"
    );

    Ok(())
}
