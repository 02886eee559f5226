//! Test utilities for creating temporary source trees and capturing events.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::events::{EventSink, RunEvent};

/// A temporary directory tree for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file with raw content.
    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Event sink that keeps a one-line description of every event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<String>,
}

impl RecordingSink {
    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn contains(&self, event: &str) -> bool {
        self.events.iter().any(|e| e == event)
    }
}

impl EventSink for RecordingSink {
    fn record(&mut self, event: RunEvent<'_>) {
        let line = match event {
            RunEvent::Started { source, .. } => format!("started {}", source.display()),
            RunEvent::DirectoryExcluded { relative } => format!("excluded {}", relative.display()),
            RunEvent::FileSkipped { relative } => format!("skipped {}", relative.display()),
            RunEvent::OutputSkipped { relative } => {
                format!("skipped output {}", relative.display())
            }
            RunEvent::SymlinkNotFollowed { relative } => {
                format!("not followed {}", relative.display())
            }
            RunEvent::FileOpened {
                relative,
                size: Some(size),
            } => format!("opened {} ({} bytes)", relative.display(), size),
            RunEvent::FileOpened { relative, size: None } => {
                format!("opened {}", relative.display())
            }
            RunEvent::FileCompleted { relative, lines } => {
                format!("completed {} ({} lines)", relative.display(), lines)
            }
            RunEvent::Warning { message, error } => format!("warning: {}: {}", message, error),
            RunEvent::Completed {
                files_processed, ..
            } => format!("finished ({} files)", files_processed),
            RunEvent::Failed { error } => format!("failed: {}", error),
        };
        self.events.push(line);
    }
}
