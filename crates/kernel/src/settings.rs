use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKDESK_ENV";
const CONFIG_DIR_ENV: &str = "BOOKDESK_CONFIG_DIR";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Default to repo root `config` directory.
                std::env::current_dir()
                    .map(|cwd| cwd.join("config"))
                    .expect("unable to resolve current directory")
            });

        let base_path = config_dir.join("base.toml");
        let environment_filename = format!("{}.toml", environment);
        let environment_path = config_dir.join(environment_filename);

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(env_source());

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = match environment.as_str() {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        Ok(settings)
    }
}

/// Environment-variable overlay, e.g. `BOOKDESK__SERVER__PORT`. The
/// double-underscore separator keeps keys like `base_url` and
/// `request_timeout_ms` addressable.
fn env_source() -> config::Environment {
    config::Environment::with_prefix("BOOKDESK")
        .separator("__")
        .try_parsing(true)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Where catalog data comes from: the live OpenLibrary API or a static
/// snapshot on disk.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Online,
    Offline,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub mode: SourceMode,
    #[serde(default = "SourceSettings::default_base_url")]
    pub base_url: String,
    #[serde(default = "SourceSettings::default_limit")]
    pub limit: u32,
    #[serde(default = "SourceSettings::default_offline_path")]
    pub offline_path: String,
}

impl SourceSettings {
    fn default_base_url() -> String {
        "https://openlibrary.org".to_string()
    }

    fn default_limit() -> u32 {
        20
    }

    fn default_offline_path() -> String {
        "data/offline_books.json".to_string()
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            mode: SourceMode::default(),
            base_url: Self::default_base_url(),
            limit: Self::default_limit(),
            offline_path: Self::default_offline_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_source_is_online_openlibrary() {
        let settings = Settings::default();
        assert_eq!(settings.source.mode, SourceMode::Online);
        assert_eq!(settings.source.base_url, "https://openlibrary.org");
        assert_eq!(settings.source.limit, 20);
    }

    #[test]
    fn env_overlay_addresses_underscored_keys() {
        let vars = std::collections::HashMap::from([
            (
                "BOOKDESK__SOURCE__BASE_URL".to_string(),
                "http://localhost:9999".to_string(),
            ),
            (
                "BOOKDESK__SERVER__REQUEST_TIMEOUT_MS".to_string(),
                "2500".to_string(),
            ),
        ]);

        let settings: Settings = config::Config::builder()
            .add_source(env_source().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.source.base_url, "http://localhost:9999");
        assert_eq!(settings.server.request_timeout_ms, 2500);
    }
}
