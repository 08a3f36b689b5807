//! # Operations Configuration
//!
//! Layered configuration for the operations core. Values come from built-in
//! defaults, then `config/operations.yaml`, then an environment-specific
//! override file, then `OPERATIONS__*` environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use operations_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let max_input = manager.config().wizard.max_input_length;
//! # Ok(())
//! # }
//! ```

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::error::{OperationsError, OperationsResult};
use crate::models::ArtifactRecordStatus;

pub use loader::ConfigManager;

/// Root configuration structure mirroring operations.yaml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OperationsConfig {
    /// Wizard session limits
    pub wizard: WizardConfig,

    /// Structural conversion limits
    pub conversion: ConversionConfig,

    /// Artifact creation settings
    pub artifacts: ArtifactConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Longest accepted single wizard input, in characters
    pub max_input_length: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_input_length: 4000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Largest raw document accepted by file analysis
    pub max_content_bytes: usize,
    /// Deepest JSON nesting accepted for structured content
    pub max_json_depth: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: 1024 * 1024,
            max_json_depth: 16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub enabled: bool,
    /// `draft` or `final`
    pub status: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            status: "draft".to_string(),
        }
    }
}

impl ArtifactConfig {
    pub fn record_status(&self) -> OperationsResult<ArtifactRecordStatus> {
        self.status
            .parse()
            .map_err(|e: String| OperationsError::Configuration(e))
    }
}

impl OperationsConfig {
    /// Reject configurations that would make every operation fail
    pub fn validate(&self) -> OperationsResult<()> {
        if self.wizard.max_input_length == 0 {
            return Err(OperationsError::Configuration(
                "wizard.max_input_length must be greater than 0".to_string(),
            ));
        }

        if self.conversion.max_content_bytes == 0 {
            return Err(OperationsError::Configuration(
                "conversion.max_content_bytes must be greater than 0".to_string(),
            ));
        }

        if self.conversion.max_json_depth == 0 {
            return Err(OperationsError::Configuration(
                "conversion.max_json_depth must be greater than 0".to_string(),
            ));
        }

        self.artifacts.record_status()?;

        Ok(())
    }
}
