//! vocab-api server binary.

use std::sync::Arc;

use tracing::info;

use vocab_api::{build_app, telemetry, AppState, ServerConfig};
use vocab_db::{log_pool_metrics, Database, PoolConfig, SettingsRepository};
use vocab_lookup::{DictionaryTranslator, StaticPosClassifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let _log_guard = telemetry::init_tracing(&config.log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        max_connections = config.db_max_connections,
        translate_timeout_ms = config.translate_timeout.as_millis() as u64,
        "Starting vocab-api"
    );

    let db = Database::connect_with_config(
        &config.database_url,
        PoolConfig::new().max_connections(config.db_max_connections),
    )
    .await?;
    db.migrate().await?;
    log_pool_metrics(db.pool());

    db.settings.ensure_row().await?;
    let settings = db.settings.get().await?;
    info!(
        target_language = %settings.target_language,
        min_word_length = settings.min_word_length,
        "Settings loaded"
    );

    let translator = DictionaryTranslator::new();
    info!(languages = ?translator.languages(), "Dictionary translator ready");

    let state = AppState::new(
        db.repositories(),
        Arc::new(translator),
        Arc::new(StaticPosClassifier::new()),
        config.translate_timeout,
    );
    let app = build_app(state, &config.allowed_origins);

    let addr = config.bind_addr()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
