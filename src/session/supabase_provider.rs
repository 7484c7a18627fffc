use std::time::Duration;

use cached::Return;
#[allow(unused_imports)]
use cached::proc_macro::cached;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::provider::SessionProvider;
use super::Profile;
use crate::env_guard::BackendSettings;
use crate::utils::log_throttle::should_emit;

const CACHE_HIT_LOG_WINDOW: Duration = Duration::from_secs(30);

/// Options for the hosted backend's auth + REST endpoints.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct SupabaseProviderConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Table holding one profile row (with its role) per auth user.
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
}

fn default_name() -> String {
    "supabase".to_string()
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

impl Default for SupabaseProviderConfig {
    fn default() -> Self {
        SupabaseProviderConfig {
            name: default_name(),
            profiles_table: default_profiles_table(),
        }
    }
}

/// Validates access tokens against the backend and loads the matching profile row.
pub struct SupabaseProvider {
    pub config: SupabaseProviderConfig,
    backend: BackendSettings,
}

impl SupabaseProvider {
    pub fn new(config: &SupabaseProviderConfig, backend: &BackendSettings) -> Self {
        info!(
            "Creating Supabase session provider '{}' for {}",
            config.name, backend.url
        );
        Self {
            config: config.clone(),
            backend: backend.clone(),
        }
    }
}

#[async_trait::async_trait]
impl SessionProvider for SupabaseProvider {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    fn get_type(&self) -> &str {
        "supabase"
    }

    async fn resolve(&self, access_token: &str) -> Result<Profile, String> {
        let cached_profile = query(
            self.backend.url.clone(),
            self.backend.anon_key.clone(),
            self.config.profiles_table.clone(),
            access_token.to_string(),
        )
        .await?;
        if cached_profile.was_cached {
            if let Some(suppressed_count) =
                should_emit("session.supabase.cache.hit", CACHE_HIT_LOG_WINDOW)
            {
                debug!(
                    event_name = "session.supabase.cache.hit",
                    event_domain = "session",
                    provider_name = self.config.name.as_str(),
                    cache_result = "hit",
                    cache_ttl_seconds = 60,
                    suppressed_count,
                    "session resolution served from cache"
                );
            }
        }
        Ok((*cached_profile).clone())
    }
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
}

/// Looks up the auth user for `token`, then its profile row.
#[cfg_attr(
    not(test),
    cached(time = 60, result = true, with_cached_flag = true, sync_writes = true)
)]
async fn query(
    url: String,
    anon_key: String,
    table: String,
    token: String,
) -> Result<Return<Profile>, String> {
    let client = reqwest::Client::new();
    let bearer = format!("Bearer {}", token);

    let user_url = format!("{}/auth/v1/user", url);
    debug!("Sending session lookup to: {}", user_url);
    let response = client
        .get(&user_url)
        .header("apikey", &anon_key)
        .header("Authorization", &bearer)
        .send()
        .await
        .map_err(|e| format!("Error sending request: {}", e))?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err("Invalid access token".to_string());
    }
    if !status.is_success() {
        return Err(format!("Unexpected status code: {}", status));
    }
    let user: AuthUser = response
        .json()
        .await
        .map_err(|e| format!("Error parsing user JSON: {}", e))?;

    let profile_url = format!("{}/rest/v1/{}", url, table);
    let response = client
        .get(&profile_url)
        .query(&[("id", format!("eq.{}", user.id)), ("select", "*".to_string())])
        .header("apikey", &anon_key)
        .header("Authorization", &bearer)
        .send()
        .await
        .map_err(|e| format!("Error sending request: {}", e))?;

    if !response.status().is_success() {
        return Err(format!(
            "Unexpected status code from {}: {}",
            table,
            response.status()
        ));
    }
    let rows: Vec<Profile> = response
        .json()
        .await
        .map_err(|e| format!("Error parsing profile JSON: {}", e))?;

    rows.into_iter()
        .next()
        .map(Return::new)
        .ok_or_else(|| format!("No profile row for user '{}'", user.id))
}
