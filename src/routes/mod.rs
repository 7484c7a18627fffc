//! HTTP route definitions and handlers.
//!
//! Dashboard paths are resolved through the route table by the shell
//! handlers; health, metrics and the session API sit beside them.

mod diagnostic_routes;
mod health_routes;
mod metrics_routes;
mod shell_routes;

use crate::env_guard::EnvCheck;
use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Explicit routes take precedence; every other path falls through to the
/// route table.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .merge(shell_routes::routes())
        .with_state(state)
}

/// Router used when the environment guard failed: every path answers with
/// the diagnostic panel.
pub fn create_diagnostic_router(check: EnvCheck) -> Router {
    diagnostic_routes::routes(check)
}
