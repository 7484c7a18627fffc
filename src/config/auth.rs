use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::session::ProviderConfig;

/// Session resolution settings.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AuthConfig {
    /// Upper bound for a single session resolution against the provider.
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
    /// Cookie carrying the access token when no `Authorization` header is sent.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub provider: ProviderConfig,
}

fn default_timeout_in_ms() -> u64 {
    3000
}

fn default_cookie_name() -> String {
    "sb-access-token".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            timeout_in_ms: default_timeout_in_ms(),
            cookie_name: default_cookie_name(),
            provider: ProviderConfig::default(),
        }
    }
}
