//! Fragment file discovery
//!
//! Fragments are found by walking a directory tree. Entries are visited in
//! file name order, so the merge order (and with it the order of appended
//! values) is the same on every run and every platform.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::{CombinerError, Result};

/// Default fragment file extensions
pub const DEFAULT_EXTENSIONS: &[&str] = &["json", "hujson"];

/// Finds fragment files under a root directory
#[derive(Debug, Clone)]
pub struct FragmentDiscovery {
    /// Root directory for file discovery
    pub root_dir: PathBuf,
    /// File name suffixes to keep, without the leading dot
    pub extensions: Vec<String>,
    /// Glob patterns, relative to `root_dir`, of files to skip
    pub exclude: Vec<String>,
}

impl FragmentDiscovery {
    /// Discovery for `.json` and `.hujson` files under `root_dir`
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Walk `root_dir` and return fragment paths in lexical order
    ///
    /// Symlinked directories are not descended into, symlinked files are
    /// kept. Any error while walking is fatal.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        info!("Walking path [{}]...", self.root_dir.display());

        let exclude = self.exclude_patterns()?;
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root_dir)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root_dir.clone());
                CombinerError::io_error(path, err.into())
            })?;

            let path = entry.path();
            if !is_file(&entry) || !self.has_fragment_extension(path) {
                continue;
            }
            if self.is_excluded(path, &exclude) {
                debug!("Skipping excluded file {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        info!("Discovered {} fragment files", files.len());
        Ok(files)
    }

    /// Check if a file name ends with one of the configured extensions
    pub fn has_fragment_extension(&self, path: &Path) -> bool {
        let name = path.to_string_lossy();
        self.extensions.iter().any(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    fn exclude_patterns(&self) -> Result<Vec<Pattern>> {
        self.exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    CombinerError::config_error(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect()
    }

    /// Check if a path matches any exclude pattern, relative to the root
    fn is_excluded(&self, path: &Path, patterns: &[Pattern]) -> bool {
        let relative_path = path.strip_prefix(&self.root_dir).unwrap_or(path);
        patterns.iter().any(|pattern| pattern.matches_path(relative_path))
    }
}

/// Regular files, and symlinks that resolve to one
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
