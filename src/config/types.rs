use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::auth::AuthConfig;
use super::backend::{BackendConfig, ANON_KEY_ENV, URL_ENV};
use super::logging::LoggingConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: bind address, backend service, session resolution and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Builds the figment used at startup: `./config.yaml`, then the backend
/// variables, then any `LEILAO_`-prefixed override (`__` separates levels).
pub fn figment() -> Figment {
    Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(
            Env::raw()
                .only(&[URL_ENV, ANON_KEY_ENV])
                .map(|key| {
                    if key.as_str().eq_ignore_ascii_case(URL_ENV) {
                        "backend.url".into()
                    } else {
                        "backend.anon_key".into()
                    }
                }),
        )
        .merge(Env::prefixed("LEILAO_").split("__"))
}

/// Extracts a `ConfigV1` from any figment.
pub fn load_config_from(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from "config.yaml" in the current directory plus the environment.
pub fn load_config() -> ConfigV1 {
    match load_config_from(figment()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error rendering schema: {}", e),
    }
}
