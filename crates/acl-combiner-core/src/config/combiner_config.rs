//! Configuration file structure
//!
//! ## Example Configuration (acl-combiner.yaml)
//!
//! ```yaml
//! # Only merge these sections; fragments carrying others are rejected
//! sections:
//!   allow: [acls, groups, tagOwners, tests]
//!   shapes:
//!     ipsets: Object
//!
//! files:
//!   extensions: [json, hujson]
//!   exclude:
//!     - "drafts/**"
//!
//! output:
//!   useTabs: false
//!   indentSize: 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::discovery::FragmentDiscovery;
use crate::format::PrinterOptions;
use crate::sections::{SectionMap, SectionShape, allowed_sections};
use crate::{CombinerError, Result};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<SectionsConfiguration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesConfiguration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfiguration>,
}

/// Which sections are merged and with what shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionsConfiguration {
    /// Allow-list intersected with the known sections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,

    /// Extra or replacement section shapes
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub shapes: IndexMap<String, SectionShape>,
}

/// Fragment discovery settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

/// Output formatting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_size: Option<usize>,
}

impl CombinerConfig {
    /// Load configuration from a file, picking the format by extension
    ///
    /// `.json` files may contain comments and trailing commas.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CombinerError::config_error(format!(
                "Cannot read config file '{}': {e}",
                path.display()
            ))
        })?;
        let invalid = |e: &dyn std::fmt::Display| {
            CombinerError::config_error(format!("Invalid config in '{}': {e}", path.display()))
        };

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => json5::from_str(&content).map_err(|e| invalid(&e)),
            Some("toml") => toml::from_str(&content).map_err(|e| invalid(&e)),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| invalid(&e)),
            _ => Err(CombinerError::config_error(format!(
                "Unsupported config file '{}' (expected .json, .toml, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    /// Section classifier after shape overrides and the allow-list
    pub fn section_map(&self) -> SectionMap {
        let Some(sections) = &self.sections else {
            return SectionMap::default();
        };

        let map = SectionMap::default().with_overrides(sections.shapes.clone());
        match &sections.allow {
            Some(allow) => allowed_sections(allow.as_slice(), &map),
            None => map,
        }
    }

    /// Fragment discovery rooted at `root_dir`
    pub fn discovery(&self, root_dir: impl Into<PathBuf>) -> FragmentDiscovery {
        let mut discovery = FragmentDiscovery::new(root_dir);
        if let Some(files) = &self.files {
            if let Some(extensions) = &files.extensions {
                discovery = discovery.with_extensions(extensions.clone());
            }
            if let Some(exclude) = &files.exclude {
                discovery = discovery.with_exclude(exclude.clone());
            }
        }
        discovery
    }

    /// Printer options, falling back to one tab per level
    pub fn printer_options(&self) -> PrinterOptions {
        let defaults = PrinterOptions::default();
        match &self.output {
            Some(output) => PrinterOptions {
                indent_size: output.indent_size.unwrap_or(defaults.indent_size),
                use_tabs: output.use_tabs.unwrap_or(defaults.use_tabs),
            },
            None => defaults,
        }
    }
}
