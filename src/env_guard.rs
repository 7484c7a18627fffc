//! Startup check for the backend service configuration.
//!
//! The shell cannot talk to the backend without its URL and public key. The
//! check runs once, before anything else is built; when it fails the process
//! serves only the diagnostic panel.

use serde::Serialize;
use thiserror::Error;

use crate::config::{BackendConfig, ANON_KEY_ENV, URL_ENV};

/// Presence report for the two required values, each judged independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvCheck {
    pub url_present: bool,
    pub anon_key_present: bool,
}

impl EnvCheck {
    pub fn evaluate(backend: &BackendConfig) -> Self {
        EnvCheck {
            url_present: is_present(backend.url.as_deref().map(normalize_url)),
            anon_key_present: is_present(backend.anon_key.as_deref()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.url_present && self.anon_key_present
    }

    /// `(name, present)` rows in display order.
    pub fn entries(&self) -> [(&'static str, bool); 2] {
        [
            (URL_ENV, self.url_present),
            (ANON_KEY_ENV, self.anon_key_present),
        ]
    }

    fn missing_names(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name)
            .collect()
    }
}

// Only absence or the empty string count as missing.
fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

// Trailing slashes are dropped before the URL is judged, so "/" is missing.
fn normalize_url(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Validated backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("missing required backend configuration: {}", .check.missing_names().join(", "))]
pub struct MissingConfig {
    pub check: EnvCheck,
}

/// Verifies both values are non-empty.
pub fn check(backend: &BackendConfig) -> Result<BackendSettings, MissingConfig> {
    let env_check = EnvCheck::evaluate(backend);
    match (&backend.url, &backend.anon_key) {
        (Some(url), Some(anon_key)) if env_check.is_complete() => Ok(BackendSettings {
            url: normalize_url(url).to_string(),
            anon_key: anon_key.clone(),
        }),
        _ => Err(MissingConfig { check: env_check }),
    }
}
