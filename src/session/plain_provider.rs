use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::provider::SessionProvider;
use super::Profile;

/// Static token → profile table, for development setups and tests.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct PlainProviderConfig {
    /// A friendly name for logs.
    #[serde(default = "default_name")]
    pub name: String,
    pub sessions: Vec<PlainSessionEntry>,
}

fn default_name() -> String {
    "plain".to_string()
}

#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct PlainSessionEntry {
    pub token: String,
    pub profile: Profile,
}

pub struct PlainProvider {
    pub config: PlainProviderConfig,
}

impl PlainProvider {
    pub fn new(config: &PlainProviderConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SessionProvider for PlainProvider {
    fn get_name(&self) -> &str {
        &self.config.name
    }

    fn get_type(&self) -> &str {
        "plain"
    }

    async fn resolve(&self, access_token: &str) -> Result<Profile, String> {
        match self
            .config
            .sessions
            .iter()
            .find(|entry| entry.token == access_token)
        {
            Some(entry) => {
                debug!("Plain provider matched profile '{}'", entry.profile.id);
                Ok(entry.profile.clone())
            }
            None => {
                warn!("Plain provider '{}' has no session for token", self.config.name);
                Err("Unknown access token".to_string())
            }
        }
    }
}
