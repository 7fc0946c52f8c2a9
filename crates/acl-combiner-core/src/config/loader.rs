//! Configuration file discovery and loading

use std::path::{Path, PathBuf};

use super::CombinerConfig;
use crate::{CombinerError, Result};

/// Config file names, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".aclcombinerrc.json",
    ".aclcombinerrc.toml",
    "acl-combiner.yaml",
    "acl-combiner.yml",
    "acl-combiner.json",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    ///
    /// Each directory is checked for the names in [`CONFIG_FILE_NAMES`], in
    /// order, before moving on to its parent.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path.canonicalize().map_err(|e| {
            CombinerError::config_error(format!(
                "Invalid path '{}': {e}",
                start_path.display()
            ))
        })?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<CombinerConfig> {
        let config = CombinerConfig::load(path)?;
        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Load config from `custom_path`, or auto-discover it from `start_dir`
    ///
    /// A missing custom path is an error; finding nothing while
    /// auto-discovering yields the default configuration.
    pub fn load(custom_path: Option<&Path>, start_dir: &Path) -> Result<CombinerConfig> {
        if let Some(path) = custom_path {
            if !path.is_file() {
                return Err(CombinerError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        match Self::auto_discover(start_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(CombinerConfig::default())
            }
        }
    }
}
