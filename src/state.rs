//! Shared application state.
//!
//! Contains the state that is shared across all request handlers:
//! configuration, session resolution, the route table and metrics.

use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::navigation::RouteTable;
use crate::session::Auth;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Only built once the backend configuration passed the environment guard.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Session resolution through the configured provider.
    pub auth: Arc<Auth>,
    /// Static path → page mapping.
    pub table: Arc<RouteTable>,
    /// Prometheus metrics registry.
    pub metrics: Metrics,
}
