use migration::{Migrator, MigratorTrait};
use rust_grant_provider::api::start_webserver;
use rust_grant_provider::config::load_config_or_panic;
use rust_grant_provider::provider::ProviderState;
use sea_orm::Database;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing() {
    let default_directives = "rust_grant_provider=info,hyper=warn,sea_orm=info";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_target(true).with_level(true);

    registry.with(layer).init();
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install().expect("Failed to install `color_eyre::install`");

    dotenvy::dotenv().ok();
    initialize_tracing();

    // Load config
    let config = Arc::new(load_config_or_panic());

    // Set up SeaORM database connection
    let db = Arc::new(
        Database::connect(&config.database_url)
            .await
            .expect("Failed to connect to database"),
    );

    // Bring the schema up to date before serving
    Migrator::up(db.as_ref(), None)
        .await
        .expect("Failed to run database migrations");

    let state = ProviderState::new(db, config);
    start_webserver(state).await?;
    Ok(())
}
