//! Run configuration
//!
//! A `RunConfig` is resolved once at startup and read-only afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory name that is always excluded, whether or not it was requested.
pub const VCS_DIR: &str = ".git";

/// Default per-line bound for transcription (4 MiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 4 * 1024 * 1024;

/// Resolved inputs for one flattening run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    source: PathBuf,
    destination: PathBuf,
    exclude_dirs: Vec<String>,
    include_exts: Vec<String>,
    exclude_set: HashSet<String>,
    include_set: HashSet<String>,
    max_line_bytes: usize,
}

impl RunConfig {
    /// Build a configuration from already-split lists.
    ///
    /// The source path is made absolute (symlinks are left unresolved; an
    /// empty path means the current directory) and [`VCS_DIR`] is appended
    /// to the exclusion list when missing.
    pub fn new(
        source: impl AsRef<Path>,
        destination: impl Into<PathBuf>,
        exclude_dirs: Vec<String>,
        include_exts: Vec<String>,
    ) -> Result<Self> {
        let source = match source.as_ref() {
            p if p.as_os_str().is_empty() => Path::new("."),
            p => p,
        };
        let source = std::path::absolute(source).map_err(|e| Error::SourcePath {
            path: source.to_path_buf(),
            source: e,
        })?;

        let exclude_dirs = ensure_vcs_excluded(exclude_dirs);
        let exclude_set = exclude_dirs.iter().cloned().collect();
        let include_set = include_exts.iter().cloned().collect();

        Ok(Self {
            source,
            destination: destination.into(),
            exclude_dirs,
            include_exts,
            exclude_set,
            include_set,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        })
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    /// Absolute source root.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Excluded names in the order they were given (for the run header).
    pub fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }

    /// Included extensions in the order they were given (for the run header).
    pub fn include_exts(&self) -> &[String] {
        &self.include_exts
    }

    pub fn exclude_set(&self) -> &HashSet<String> {
        &self.exclude_set
    }

    pub fn include_set(&self) -> &HashSet<String> {
        &self.include_set
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Extensions that lack a leading dot and so can never match a file.
    pub fn undotted_extensions(&self) -> impl Iterator<Item = &str> {
        self.include_exts
            .iter()
            .map(String::as_str)
            .filter(|ext| !ext.starts_with('.'))
    }
}

/// Append [`VCS_DIR`] to the list if it is not already present.
pub fn ensure_vcs_excluded(mut exclude_dirs: Vec<String>) -> Vec<String> {
    if !exclude_dirs.iter().any(|d| d == VCS_DIR) {
        exclude_dirs.push(VCS_DIR.to_string());
    }
    exclude_dirs
}
