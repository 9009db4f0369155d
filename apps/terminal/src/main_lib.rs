use std::sync::Arc;

use tickerbar_core::settings::{InMemorySettingsRepository, SettingsRepositoryTrait};
use tickerbar_market_data::{DemoProvider, QuoteSource, YahooProvider};
use tickerbar_storage_sqlite::{create_pool, init, run_migrations, spawn_writer, SettingsRepository};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ProviderKind, IN_MEMORY_DB};

/// Logs go to stderr; stdout belongs to the status line.
pub fn init_tracing() {
    let log_format =
        std::env::var("TICKERBAR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Opens the settings store. Must run inside the tokio runtime, the SQLite
/// writer is a task.
pub fn build_settings(config: &Config) -> anyhow::Result<Arc<dyn SettingsRepositoryTrait>> {
    if config.db_path == IN_MEMORY_DB {
        tracing::info!("Settings kept in memory only");
        return Ok(Arc::new(InMemorySettingsRepository::new()));
    }

    init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);
    let pool = create_pool(&config.db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.as_ref().clone());
    Ok(Arc::new(SettingsRepository::new(pool, writer)))
}

pub fn build_source(config: &Config) -> anyhow::Result<Arc<dyn QuoteSource>> {
    let source: Arc<dyn QuoteSource> = match config.provider {
        ProviderKind::Yahoo => Arc::new(YahooProvider::with_options(
            config.yahoo_base_url.clone(),
            config.request_timeout,
        )?),
        ProviderKind::Demo => Arc::new(DemoProvider::default()),
    };
    tracing::info!("Quote source: {}", source.id());
    Ok(source)
}
