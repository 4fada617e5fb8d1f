//! Configuration file resolution and loading
//!
//! Config path priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CREDENCE_CONFIG`)
//! 3. User config directory (`<config dir>/credence/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! A file named explicitly (CLI or environment) must exist and parse. A file
//! missing from the user config directory is not an error: defaults apply.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CREDENCE_CONFIG";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Emit JSON-formatted log lines instead of human-readable ones
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Where a resolved config path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    UserConfigDir,
}

impl ConfigSource {
    /// Explicitly named files must exist; the default location may be absent.
    fn is_explicit(self) -> bool {
        !matches!(self, ConfigSource::UserConfigDir)
    }
}

/// Resolves which config file (if any) applies for an application
pub struct ConfigPathResolver {
    app_name: String,
}

impl ConfigPathResolver {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Resolve config path following the priority order in the module docs
    pub fn resolve(&self, cli_arg: Option<&Path>) -> Option<(PathBuf, ConfigSource)> {
        // Priority 1: Command-line argument
        if let Some(path) = cli_arg {
            return Some((path.to_path_buf(), ConfigSource::CommandLine));
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some((PathBuf::from(path), ConfigSource::Environment));
            }
        }

        // Priority 3: User config directory
        self.default_config_path()
            .map(|path| (path, ConfigSource::UserConfigDir))
    }

    /// Platform config location, e.g. `~/.config/credence/config.toml` on Linux
    pub fn default_config_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(&self.app_name).join("config.toml"))
    }

    /// Load configuration, falling back to `T::default()` when no file applies
    pub fn load<T>(&self, cli_arg: Option<&Path>) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some((path, source)) = self.resolve(cli_arg) else {
            info!("No config location available, using compiled defaults");
            return Ok(T::default());
        };

        if !path.exists() {
            if source.is_explicit() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            warn!(
                "Config file {} not found, using compiled defaults",
                path.display()
            );
            return Ok(T::default());
        }

        let config = read_toml_file(&path)?;
        info!("Configuration loaded from {} ({:?})", path.display(), source);
        Ok(config)
    }
}

/// Read and parse a TOML file into `T`
pub fn read_toml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults() {
        let logging = LoggingConfig::default();
        assert_eq!(logging.level, "info");
        assert!(!logging.json);
    }

    #[test]
    fn test_logging_partial_toml_uses_defaults() {
        let logging: LoggingConfig = toml::from_str("json = true").unwrap();
        assert_eq!(logging.level, "info");
        assert!(logging.json);
    }

    #[test]
    fn test_cli_argument_has_highest_priority() {
        let resolver = ConfigPathResolver::new("credence-test");
        let (path, source) = resolver
            .resolve(Some(Path::new("/tmp/explicit.toml")))
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/explicit.toml"));
        assert_eq!(source, ConfigSource::CommandLine);
    }

    #[test]
    fn test_explicit_sources() {
        assert!(ConfigSource::CommandLine.is_explicit());
        assert!(ConfigSource::Environment.is_explicit());
        assert!(!ConfigSource::UserConfigDir.is_explicit());
    }
}
