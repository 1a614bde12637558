mod api;
mod middleware;

use std::sync::Arc;

use ethnica_places::{GooglePlacesUpstream, HttpOptions, SearchOrchestrator};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limits, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(ethnica_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let orchestrator = SearchOrchestrator::from_config(&config)?;
    let upstream = match config.google_places_api_key.as_deref() {
        Some(key) => Some(Arc::new(GooglePlacesUpstream::new(
            key,
            &HttpOptions::from_config(&config),
        )?)),
        None => {
            tracing::warn!("GOOGLE_PLACES_API_KEY not set; places proxy will answer API_KEY_MISSING");
            None
        }
    };

    tracing::info!(
        env = %config.env,
        providers = ?orchestrator.provider_names(),
        features = ?config.features(),
        "starting ethnica server"
    );

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        upstream,
        config: Arc::clone(&config),
    };
    let app = build_app(state, default_rate_limits());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
