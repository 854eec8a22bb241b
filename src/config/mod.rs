//! Configuration loading and types for folio.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for the patch plan (`types`)
//! - Loading the plan from `folio.yaml` (`load`)
//! - Resolving the plan's relative paths (`resolve`)

mod load;
mod resolve;
mod types;

pub use resolve::base_path_from_config;
pub use types::{
    AboutConfig, CardConfig, CategoryRule, FilterButton, FiltersConfig, FolioConfig, FormConfig,
    LinksConfig, ModalsConfig, RewriteRule,
};

/// Default config file name.
pub const CONFIG_FILE: &str = "folio.yaml";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to encode config file path as a unicode string: {0}")]
    EncodePath(std::path::PathBuf),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}

impl FolioConfig {
    /// Check the parts of the plan serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'stages' must list at least one stage".into(),
            ));
        }
        if self.document.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'document' must not be empty".into(),
            ));
        }
        if self.form.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'form.endpoint' must not be empty".into(),
            ));
        }
        if let Some(rule) = self.categories.iter().find(|r| r.categories.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "invalid config: category rule for '{}' has no categories",
                rule.title
            )));
        }
        Ok(())
    }
}
