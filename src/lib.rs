//! Library exports for leilao-shell, shared between the binary and tests.

pub mod config;
pub mod env_guard;
pub mod gate;
pub mod metrics;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
pub mod view;
