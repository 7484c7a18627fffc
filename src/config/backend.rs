use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Environment variable holding the backend service URL.
pub const URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the backend service public (anon) key.
pub const ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Connection settings for the hosted backend service.
///
/// Both values are optional at parse time so that a half-configured process
/// still starts and can report what is missing (see `env_guard`).
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct BackendConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}
