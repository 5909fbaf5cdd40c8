//! # riskguard-server
//!
//! Loads the model artifact, then serves predictions until shut down.

use server::{app, AppState, ServerConfig, StartupError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;

    // Fail before binding so a missing model never serves traffic
    let state = AppState::load(&config.model_path)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "riskguard-server v{} listening on {} (model: {})",
        env!("CARGO_PKG_VERSION"),
        addr,
        config.model_path.display()
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "riskguard_server=info,server=info,anomaly_core=info,tower_http=info".into()
            }),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
