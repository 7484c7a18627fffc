//! Metrics collection and exposition for Prometheus.
//!
//! This module provides centralized metrics recording for gate decisions
//! and session resolutions.

mod recorder;

pub use recorder::{Metrics, MetricsRecorder};
