use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::context::AuthContext;
use super::provider::SessionProvider;
use super::Profile;
use crate::config::AuthConfig;
use crate::metrics::{Metrics, MetricsRecorder};

/// Resolves access tokens into profiles through the configured provider.
///
/// Owns the timeout policy: a provider that does not answer in time is
/// treated like a failed lookup and the visitor is anonymous.
pub struct Auth {
    pub provider: Box<dyn SessionProvider>,
    config: AuthConfig,
    metrics: Metrics,
}

impl Auth {
    pub fn new(provider: Box<dyn SessionProvider>, config: AuthConfig, metrics: Metrics) -> Self {
        info!(
            "Using session provider '{}' ({})",
            provider.get_name(),
            provider.get_type()
        );
        Auth {
            provider,
            config,
            metrics,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Resolves `token`; `None` when absent, rejected or timed out.
    pub async fn resolve(&self, token: Option<&str>) -> Option<Profile> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => {
                debug!("No access token presented; visitor is anonymous");
                return None;
            }
        };

        let name = self.provider.get_name();
        let timeout_duration = Duration::from_millis(self.config.timeout_in_ms);
        let started = Instant::now();
        let result = match timeout(timeout_duration, self.provider.resolve(token)).await {
            Ok(Ok(profile)) => Ok(profile),
            Ok(Err(e)) => Err(("failure", format!("Provider '{}' failed: {}", name, e))),
            Err(_) => Err(("timeout", format!("Provider '{}' timed out", name))),
        };
        self.metrics
            .record_session_duration(name, started.elapsed().as_secs_f64());

        match result {
            Ok(profile) => {
                self.metrics.record_session_resolution(name, "success");
                info!(
                    event_name = "session.resolved",
                    event_domain = "session",
                    provider_name = name,
                    profile_id = profile.id.as_str(),
                    role = profile.role.as_str(),
                    "session resolved"
                );
                Some(profile)
            }
            Err((label, message)) => {
                self.metrics.record_session_resolution(name, label);
                warn!("{}", message);
                None
            }
        }
    }

    /// Returns a context in the resolving state and resolves it in the background.
    pub fn spawn_resolution(self: &Arc<Self>, token: Option<String>) -> AuthContext {
        let context = AuthContext::new();
        let auth = self.clone();
        let publisher = context.clone();
        tokio::spawn(async move {
            let profile = auth.resolve(token.as_deref()).await;
            publisher.finish_resolution(profile);
        });
        context
    }
}
