//! Resolving the plan's relative paths against the config directory.

use std::path::{Path, PathBuf};

use super::FolioConfig;

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Absolute (or base-relative) locations the run reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub document: PathBuf,
    pub output: PathBuf,
    pub fragments_dir: PathBuf,
}

impl FolioConfig {
    /// Resolve `document`, `output` and `fragments_dir` against `base_path`.
    pub fn resolve_paths(&self, base_path: &Path) -> ResolvedPaths {
        let document = join(base_path, &self.document);
        let output = self
            .output
            .as_deref()
            .map(|p| join(base_path, p))
            .unwrap_or_else(|| document.clone());
        let fragments_dir = self
            .fragments_dir
            .as_deref()
            .map(|p| join(base_path, p))
            .unwrap_or_else(|| base_path.to_path_buf());

        ResolvedPaths {
            document,
            output,
            fragments_dir,
        }
    }
}

fn join(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
