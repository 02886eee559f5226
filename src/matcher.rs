//! Exclusion and inclusion predicates
//!
//! Directory decisions only consult the exclusion set and file decisions only
//! consult the inclusion set. Matching is exact and case-sensitive.

use std::collections::HashSet;
use std::path::Path;

/// Decides which directories are pruned and which files are transcribed.
#[derive(Debug, Clone, Copy)]
pub struct PathMatcher<'a> {
    exclude: &'a HashSet<String>,
    include: &'a HashSet<String>,
}

impl<'a> PathMatcher<'a> {
    pub fn new(exclude: &'a HashSet<String>, include: &'a HashSet<String>) -> Self {
        Self { exclude, include }
    }

    /// Check if a directory (relative to the source root) should be pruned.
    pub fn should_exclude_directory(&self, relative: &Path) -> bool {
        should_exclude_directory(relative, self.exclude)
    }

    /// Check if a file should be transcribed.
    pub fn should_include_file(&self, path: &Path) -> bool {
        should_include_file(path, self.include)
    }
}

/// True if any segment of `relative`, or the whole of it, is in `exclude`.
pub fn should_exclude_directory(relative: &Path, exclude: &HashSet<String>) -> bool {
    if exclude.is_empty() {
        return false;
    }

    let segment_match = relative
        .components()
        .any(|c| exclude.contains(&*c.as_os_str().to_string_lossy()));

    segment_match || exclude.contains(&*relative.to_string_lossy())
}

/// True if `include` is empty or holds the file's extension.
pub fn should_include_file(path: &Path, include: &HashSet<String>) -> bool {
    if include.is_empty() {
        return true;
    }

    file_extension(path).is_some_and(|ext| include.contains(ext))
}

/// Extension of the file name including its leading dot.
///
/// Taken from the last `.` in the final component, so `.bashrc` yields
/// `.bashrc` and `archive.tar.gz` yields `.gz`. Names without a dot yield
/// `None`.
pub fn file_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx..])
}
