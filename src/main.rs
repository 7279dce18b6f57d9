use fuel_log::config::resolve_port;
use fuel_log::{resolve_data_path, router, AppState, EntryLog, FileStore, FuelConfig};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let config = FuelConfig::from_env();
    let log = EntryLog::new(FileStore::new(&data_path));
    let entries = log.load().await.len();
    info!(
        path = %data_path.display(),
        entries,
        price = config.fuel_price_per_liter,
        "fuel log opened"
    );

    let app = router(AppState::new(config, log));

    let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port()));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
