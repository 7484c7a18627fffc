//! Application startup and server initialization.
//!
//! The environment guard runs first. With a complete backend configuration
//! the session provider, route table and HTTP routes are built; otherwise
//! only the diagnostic panel is served.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ConfigV1;
use crate::env_guard;
use crate::metrics::Metrics;
use crate::navigation::RouteTable;
use crate::routes;
use crate::session::{create_session_provider, Auth};
use crate::state::AppState;

/// Builds the router for `config`, running the environment guard exactly once.
pub fn build_app(config: Arc<ConfigV1>) -> axum::Router {
    let backend = match env_guard::check(&config.backend) {
        Ok(backend) => backend,
        Err(missing) => {
            error!(
                event_name = "startup.config.missing",
                event_domain = "startup",
                url_present = missing.check.url_present,
                anon_key_present = missing.check.anon_key_present,
                "{}",
                missing
            );
            return routes::create_diagnostic_router(missing.check);
        }
    };

    let metrics = Metrics::new();
    let provider = create_session_provider(&config.auth.provider, &backend);
    let auth = Arc::new(Auth::new(provider, config.auth.clone(), metrics.clone()));

    let state = AppState {
        config: config.clone(),
        auth,
        table: Arc::new(RouteTable::dashboard()),
        metrics,
    };

    routes::create_router(state)
}

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error while serving.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(config.clone());

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
