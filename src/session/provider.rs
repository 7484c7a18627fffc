use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::plain_provider::{PlainProvider, PlainProviderConfig};
use super::supabase_provider::{SupabaseProvider, SupabaseProviderConfig};
use super::Profile;
use crate::env_guard::BackendSettings;

/// Which session provider resolves access tokens.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
#[serde(tag = "type")]
pub enum ProviderConfig {
    #[serde(rename = "supabase")]
    Supabase(SupabaseProviderConfig),
    #[serde(rename = "plain")]
    Plain(PlainProviderConfig),
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Supabase(SupabaseProviderConfig::default())
    }
}

/// A session provider turns an access token into the visitor's profile.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    fn get_name(&self) -> &str;
    fn get_type(&self) -> &str;
    async fn resolve(&self, access_token: &str) -> Result<Profile, String>;
}

/// Create a session provider from a given config.
pub fn create_session_provider(
    config: &ProviderConfig,
    backend: &BackendSettings,
) -> Box<dyn SessionProvider> {
    match config {
        ProviderConfig::Supabase(cfg) => Box::new(SupabaseProvider::new(cfg, backend)),
        ProviderConfig::Plain(cfg) => Box::new(PlainProvider::new(cfg)),
    }
}
