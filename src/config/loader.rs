//! Configuration Loader
//!
//! Environment-aware configuration loading. Handles file discovery, environment
//! detection and layering with the `config` crate.

use super::OperationsConfig;
use crate::error::OperationsResult;
use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const BASE_FILE_STEM: &str = "operations";
const ENV_PREFIX: &str = "OPERATIONS";

pub struct ConfigManager {
    config: OperationsConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> OperationsResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> OperationsResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment.
    /// Useful for testing without modifying global environment variables.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> OperationsResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::build(&config_directory, environment)?;
        config.validate()?;

        tracing::info!(
            environment = %environment,
            max_input_length = config.wizard.max_input_length,
            max_content_bytes = config.conversion.max_content_bytes,
            artifacts_enabled = config.artifacts.enabled,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Wrap an already-built configuration, e.g. in tests or embedders
    pub fn from_config(config: OperationsConfig) -> OperationsResult<Arc<ConfigManager>> {
        config.validate()?;
        Ok(Arc::new(ConfigManager {
            config,
            environment: Self::detect_environment(),
            config_directory: PathBuf::from("config"),
        }))
    }

    pub fn config(&self) -> &OperationsConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Defaults, then base file, then environment file, then env vars
    fn build(config_directory: &Path, environment: &str) -> OperationsResult<OperationsConfig> {
        let base = config_directory.join(format!("{BASE_FILE_STEM}.yaml"));
        let overrides = config_directory.join(format!("{BASE_FILE_STEM}.{environment}.yaml"));

        let config = Config::builder()
            .add_source(File::from(base).required(false))
            .add_source(File::from(overrides).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub(crate) fn detect_environment() -> String {
        env::var("OPERATIONS_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::load_from_directory_with_env(
            Some(dir.path().join("absent")),
            "test",
        )
        .unwrap();
        assert_eq!(manager.config().wizard.max_input_length, 4000);
        assert_eq!(manager.environment(), "test");
    }

    #[test]
    fn test_environment_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("operations.yaml"),
            "wizard:\n  max_input_length: 500\nartifacts:\n  status: final\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("operations.test.yaml"),
            "wizard:\n  max_input_length: 250\n",
        )
        .unwrap();

        let manager =
            ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
                .unwrap();
        assert_eq!(manager.config().wizard.max_input_length, 250);
        assert_eq!(manager.config().artifacts.status, "final");
        assert_eq!(manager.config().conversion.max_json_depth, 16);
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("operations.yaml"),
            "conversion:\n  max_content_bytes: 0\n",
        )
        .unwrap();

        let result =
            ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test");
        assert!(result.is_err());
    }
}
