//! Service Configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `TRIAGE_*` environment variables (`__` separates sections, e.g.
//! `TRIAGE_ENGINE__FIRING_LIMIT_FACTOR=8`).

use crate::rate_limit::RateLimitConfig;
use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use rule_engine::EngineConfig;
use serde::Deserialize;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "conduct-triage.toml";
/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "CONDUCT_TRIAGE_CONFIG";
pub const ENV_PREFIX: &str = "TRIAGE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub log: LogSettings,
    pub engine: EngineConfig,
    pub rate_limit: RateLimitConfig,
}

impl Settings {
    /// Load from the configuration file (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_sources(
            File::new(&path, FileFormat::Toml).required(false),
            Self::environment(),
        )
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_sources<F, E>(file: F, env: E) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
        E: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::environment().source(Some(map))
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings =
            Settings::from_sources(File::from_str("", FileFormat::Toml), env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.engine.firing_limit_factor, 4);
    }

    #[test]
    fn test_file_then_environment() {
        let toml = r#"
            [server]
            addr = "127.0.0.1:9000"

            [log]
            level = "debug"

            [engine]
            firing_limit_factor = 6
        "#;
        let settings = Settings::from_sources(
            File::from_str(toml, FileFormat::Toml),
            env(&[
                ("TRIAGE_ENGINE__FIRING_LIMIT_FACTOR", "8"),
                ("TRIAGE_LOG__JSON", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.server.addr, "127.0.0.1:9000");
        assert_eq!(settings.log.level, "debug");
        assert!(settings.log.json);
        assert_eq!(settings.engine.firing_limit_factor, 8);
        assert_eq!(settings.rate_limit, RateLimitConfig::default());
    }
}
