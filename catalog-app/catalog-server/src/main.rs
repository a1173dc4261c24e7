use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info};

use catalog_api::{build_router, AppState};
use catalog_core::repositories::ProductRepository;
use catalog_infrastructure::database::{connection, PgProductRepository};
use catalog_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize telemetry; the guard flushes buffered log lines on exit
    let _telemetry_guard = catalog_shared::telemetry::init_telemetry()?;

    info!("Catalog server starting...");

    // Load configuration
    let config = AppConfig::load().inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // Connect to Database
    info!(
        "Connecting to database (max {} connections)...",
        config.database.max_connections
    );
    let pool = connection::create_pool(&config.database).await?;
    info!("Database connection established.");

    if config.database.run_migrations {
        connection::run_migrations(&pool).await?;
    }

    // Create App State
    let product_repo: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(pool.clone()));
    let state = AppState::new(product_repo)?;

    // Build router
    let app = with_static_assets(build_router(state), &config.app.static_dir);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("{} listening on {}", config.app.name, addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Catalog server stopped");

    Ok(())
}

/// Landing page and stylesheet, served from the configured static directory
fn with_static_assets(router: Router, static_dir: &str) -> Router {
    let dir = Path::new(static_dir);
    router
        .nest_service("/assets", ServeDir::new(dir.join("assets")))
        .route_service("/index.html", ServeFile::new(dir.join("index.html")))
        .route_service("/", ServeFile::new(dir.join("index.html")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
