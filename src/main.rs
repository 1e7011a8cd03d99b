use chrono::Utc;
use dotenvy::dotenv;
use invoice_buddy::{
    Result, app,
    config::{database, settings},
    store::SeaOrmStore,
};
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

    // 3. Load application settings
    let config = settings::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open the database and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed cards, schedule today's payments, optionally persist priorities
    let store = SeaOrmStore::new(db);
    app::run_daily(&store, &config, Utc::now().date_naive())
        .await
        .inspect_err(|e| error!("Scheduling run failed: {}", e))?;

    Ok(())
}
