use shetkari_tracker::{load_session, router, ApiClient, AppState, Config};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if let Some(parent) = config.session_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let session = load_session(&config.session_path).await;
    info!(
        api_base_url = %config.api_base_url,
        day_boundary = ?config.day_boundary,
        signed_in = session.token().is_some(),
        "configuration loaded"
    );

    let state = AppState::new(
        ApiClient::new(config.api_base_url.clone()),
        config.day_boundary,
        config.session_path.clone(),
        session,
    );
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!("failed to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}
