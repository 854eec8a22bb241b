//! Configuration loading from files.

use std::path::Path;

use super::{CONFIG_FILE, ConfigError, FolioConfig};

impl FolioConfig {
    /// Load the config from the command line argument, defaulting to `folio.yaml`.
    ///
    /// A missing file is not an error: the built-in plan is used.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let config = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml).required(false))
            .build()?
            .try_deserialize::<FolioConfig>()?;

        config.validate()?;
        Ok(config)
    }
}
