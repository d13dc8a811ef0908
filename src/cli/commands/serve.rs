use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{self, AppConfig};
use crate::controller::ControllerRegistry;
use crate::database::{DatabaseManager, DocStore, MemoryStore, PgDocStore};
use crate::handlers::AppState;

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Serve from a JSON fixture instead of PostgreSQL")]
    pub fixtures: Option<PathBuf>,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting CRM View API in {:?} mode", config.environment);

    let store = build_store(config, args.fixtures.as_ref()).await?;
    let controllers = build_registry(config)?;
    tracing::info!("Loaded {} doctype controller(s)", controllers.len());

    let app = crate::app(AppState::new(store, controllers));

    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("CRM View API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

async fn build_store(config: &AppConfig, fixtures: Option<&PathBuf>) -> anyhow::Result<Arc<dyn DocStore>> {
    let store: Arc<dyn DocStore> = match fixtures {
        Some(path) => {
            tracing::info!("Using fixture store from {}", path.display());
            Arc::new(MemoryStore::load_file(path)?)
        }
        None => {
            let pool = DatabaseManager::connect(&config.database).await?;
            Arc::new(PgDocStore::new(pool, config.database.enable_query_logging))
        }
    };
    Ok(store)
}

fn build_registry(config: &AppConfig) -> anyhow::Result<ControllerRegistry> {
    let mut registry = ControllerRegistry::new();
    match &config.controllers.definitions_path {
        Some(path) if std::path::Path::new(path).exists() => {
            registry.load_file(path)?;
        }
        Some(path) => tracing::warn!("Controller definitions {} not found, using defaults", path),
        None => tracing::debug!("No controller definitions configured"),
    }
    Ok(registry)
}
