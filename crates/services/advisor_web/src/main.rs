// File: services/advisor_web/src/main.rs
use std::time::Duration;

use advisor_common::{config_error, init_from_config, AdvisorError, Context};
use advisor_config::load_config;
use advisor_web::browser::idle_limit;
use advisor_web::{app, AppState};
use tokio::net::TcpListener;
use tracing::info;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), AdvisorError> {
    let config = load_config().map_err(config_error)?;
    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_from_config(&config.logging);

    let state = AppState::new(config)?;

    // Idle browser contexts hold session tokens; drop them after the idle timeout.
    let browsers = state.browsers.clone();
    let max_idle = idle_limit(state.config.session.idle_timeout_minutes);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            browsers.purge_idle(max_idle);
        }
    });

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    info!(
        "Backend API at {} (browser redirects to {})",
        state.config.api.base_url,
        state.browser_api_url()
    );
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app(state).into_make_service()).await?;
    Ok(())
}
