use anyhow::Context;
use field_db::FieldStore;
use field_db::config::{Config, load_config};
use field_db::http::{AppState, build_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();
    init_logging(&config);

    let store = match &config.db_path {
        Some(path) => FieldStore::open(path)
            .with_context(|| format!("opening database {}", path.display()))?,
        None => FieldStore::open_in_memory().context("opening in-memory database")?,
    };
    let fields = store.count_fields()?;
    info!(event = "store_open", path = ?config.db_path, fields);

    let app = build_router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;

    info!(event = "server_start", addr = %config.addr);

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!(event = "server_stop");
    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
