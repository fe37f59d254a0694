//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary)
//! 2. Environment variables
//! 3. `--config <file>`, or `.userfetch.toml` in the working directory
//! 4. `~/.config/userfetch/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub throttle: ThrottleConfig,
    pub logging: LoggingConfig,
}

/// Remote endpoint and id draw settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base endpoint; a record is read from `<base_url>/<id>`.
    pub base_url: String,
    /// Upper bound fed into the id draw (ids come out in `1..max_user_id`).
    pub max_user_id: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            max_user_id: constants::DEFAULT_MAX_USER_ID,
        }
    }
}

/// Trigger throttle settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub delay_ms: u64,
}

impl ThrottleConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            delay_ms: constants::DEFAULT_THROTTLE_MS,
        }
    }
}

/// Diagnostic output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A level (`warn`) or a full `tracing` filter directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: constants::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// One config file as written: only the keys it actually sets.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    source: SourceLayer,
    throttle: ThrottleLayer,
    logging: LoggingLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourceLayer {
    base_url: Option<String>,
    max_user_id: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThrottleLayer {
    delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingLayer {
    level: Option<String>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then either the explicit `config_file` or
    /// the `.userfetch.toml` in `work_dir`, then applies environment
    /// variable overrides and validates the result. An explicit file must
    /// exist; the implicit ones are skipped when absent.
    pub fn load(
        config_file: Option<&Path>,
        work_dir: Option<&Path>,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: explicit or local config
        match config_file {
            Some(path) => {
                let explicit = Self::load_file(path)?;
                config.merge(explicit);
            }
            None => {
                if let Some(dir) = work_dir {
                    let local_path = dir.join(constants::CONFIG_FILENAME);
                    if local_path.exists() {
                        let local = Self::load_file(&local_path)?;
                        config.merge(local);
                    }
                }
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env)?;

        config.validate()?;
        Ok(config)
    }

    /// Load a config layer from a specific file.
    fn load_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge a file layer into this config. Every key the layer sets wins,
    /// including keys set back to their built-in default.
    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(base_url) = layer.source.base_url {
            self.source.base_url = base_url;
        }
        if let Some(max_user_id) = layer.source.max_user_id {
            self.source.max_user_id = max_user_id;
        }
        if let Some(delay_ms) = layer.throttle.delay_ms {
            self.throttle.delay_ms = delay_ms;
        }
        if let Some(level) = layer.logging.level {
            self.logging.level = level;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) -> Result<(), ConfigError> {
        if let Ok(val) = env.var(constants::ENV_BASE_URL) {
            self.source.base_url = val;
        }

        if let Some(parsed) = env.parsed::<u64>(constants::ENV_THROTTLE_MS) {
            self.throttle.delay_ms = parsed.map_err(|value| ConfigError::InvalidEnv {
                name: constants::ENV_THROTTLE_MS,
                value,
            })?;
        }

        if let Some(parsed) = env.parsed::<u32>(constants::ENV_MAX_USER_ID) {
            self.source.max_user_id = parsed.map_err(|value| ConfigError::InvalidEnv {
                name: constants::ENV_MAX_USER_ID,
                value,
            })?;
        }

        if let Ok(val) = env.var(constants::ENV_LOG) {
            if !val.trim().is_empty() {
                self.logging.level = val;
            }
        }

        Ok(())
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("source.base_url must not be empty".into()));
        }
        if self.source.max_user_id < 2 {
            return Err(ConfigError::Invalid(format!(
                "source.max_user_id must be at least 2, got {}",
                self.source.max_user_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.source.base_url, "https://jsonplaceholder.typicode.com/users");
        assert_eq!(config.source.max_user_id, 10);
        assert_eq!(config.throttle.delay_ms, 500);
        assert_eq!(config.throttle.delay(), Duration::from_millis(500));
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[source]
base_url = "http://localhost:3000/users"
max_user_id = 5

[throttle]
delay_ms = 1000

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source.base_url, "http://localhost:3000/users");
        assert_eq!(config.source.max_user_id, 5);
        assert_eq!(config.throttle.delay_ms, 1000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[throttle]\ndelay_ms = 100\n").unwrap();
        assert_eq!(config.throttle.delay_ms, 100);
        assert_eq!(config.source, SourceConfig::default());
    }

    fn layer(toml_str: &str) -> ConfigLayer {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn merge_overrides_set_values() {
        let mut base = Config::default();
        base.merge(layer(
            r#"
[source]
base_url = "http://mirror.test/users"
max_user_id = 4

[throttle]
delay_ms = 50

[logging]
level = "info"
"#,
        ));

        assert_eq!(base.source.base_url, "http://mirror.test/users");
        assert_eq!(base.source.max_user_id, 4);
        assert_eq!(base.throttle.delay_ms, 50);
        assert_eq!(base.logging.level, "info");
    }

    #[test]
    fn merge_keeps_base_for_unset_keys() {
        let mut base = Config::default();
        base.throttle.delay_ms = 900;
        base.logging.level = "trace".to_string();

        base.merge(layer("[source]\nmax_user_id = 4\n"));

        assert_eq!(base.throttle.delay_ms, 900);
        assert_eq!(base.logging.level, "trace");
        assert_eq!(base.source.max_user_id, 4);
    }

    #[test]
    fn merge_applies_values_equal_to_defaults() {
        let mut base = Config::default();
        base.merge(layer(
            "[source]\nmax_user_id = 3\n[throttle]\ndelay_ms = 1000\n[logging]\nlevel = \"debug\"\n",
        ));

        base.merge(layer(
            "[source]\nmax_user_id = 10\n[throttle]\ndelay_ms = 500\n[logging]\nlevel = \"warn\"\n",
        ));

        assert_eq!(base, Config::default());
    }

    #[test]
    fn explicit_file_can_restore_default_throttle() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("fast.toml");
        std::fs::write(&explicit, "[throttle]\ndelay_ms = 500\n").unwrap();

        let mut config = Config::default();
        config.throttle.delay_ms = 1000;
        config.merge(Config::load_file(&explicit).unwrap());
        assert_eq!(config.throttle.delay_ms, 500);

        let loaded = Config::load(Some(&explicit), None, &no_env()).unwrap();
        assert_eq!(loaded.throttle.delay_ms, 500);
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let result = Config::load_file(&path);
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn load_explicit_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        let result = Config::load(Some(&missing), None, &no_env());
        assert!(result.unwrap_err().to_string().contains("read"));
    }

    #[test]
    fn load_from_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".userfetch.toml"),
            "[throttle]\ndelay_ms = 1500\n",
        )
        .unwrap();

        let config = Config::load(None, Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.throttle.delay_ms, 1500);
    }

    #[test]
    fn explicit_file_replaces_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".userfetch.toml"),
            "[throttle]\ndelay_ms = 1500\n",
        )
        .unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[source]\nmax_user_id = 3\n").unwrap();

        let config = Config::load(Some(&explicit), Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.source.max_user_id, 3);
        assert_eq!(config.throttle.delay_ms, 500);
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".userfetch.toml"),
            "[throttle]\ndelay_ms = 1500\n",
        )
        .unwrap();
        let env = Env::mock([
            ("USERFETCH_THROTTLE_MS", "20"),
            ("USERFETCH_BASE_URL", "http://127.0.0.1:8080/users"),
            ("USERFETCH_MAX_USER_ID", "6"),
            ("USERFETCH_LOG", "userfetch=debug"),
        ]);

        let config = Config::load(None, Some(dir.path()), &env).unwrap();
        assert_eq!(config.throttle.delay_ms, 20);
        assert_eq!(config.source.base_url, "http://127.0.0.1:8080/users");
        assert_eq!(config.source.max_user_id, 6);
        assert_eq!(config.logging.level, "userfetch=debug");
    }

    #[test]
    fn invalid_env_number_is_an_error() {
        let env = Env::mock([("USERFETCH_THROTTLE_MS", "half a second")]);
        let mut config = Config::default();

        let err = config.apply_env_vars(&env).unwrap_err();
        assert!(err.to_string().contains("USERFETCH_THROTTLE_MS"), "got: {err}");
    }

    #[test]
    fn validate_rejects_tiny_max_user_id() {
        let mut config = Config::default();
        config.source.max_user_id = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.source.base_url = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn global_config_path_mentions_app_dir() {
        if let Some(p) = Config::global_config_path() {
            assert!(p.to_str().unwrap().contains("userfetch"));
        }
    }
}
