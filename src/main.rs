use std::error::Error;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use event_dashboard_server::config::{Config, StoreBackend};
use event_dashboard_server::routes::create_routes;
use event_dashboard_server::state::AppState;
use event_dashboard_server::store::{MemoryStore, PgStore, Store};

const DEFAULT_LOG_FILTER: &str = "event_dashboard_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Postgres => {
            let store = PgStore::connect(&config).await?;
            store.migrate().await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let app = create_routes(AppState::new(store), &config.cors_allowed_origins);

    let addr = config.bind_addr();
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
