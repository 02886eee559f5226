//! Diagnostic events emitted during a run
//!
//! Components never log directly. They report `RunEvent`s to an `EventSink`
//! handed to them by the caller; `TracingSink` forwards events to `tracing`.
//! File content is never part of an event.

use std::path::Path;
use std::time::Duration;

use crate::error::Error;

/// Something worth reporting while flattening a tree.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// The output is open and traversal is about to start.
    Started {
        source: &'a Path,
        destination: &'a Path,
        exclude_dirs: &'a [String],
        include_exts: &'a [String],
    },
    /// A directory and its whole subtree were pruned.
    DirectoryExcluded { relative: &'a Path },
    /// A file's extension is not in the inclusion set.
    FileSkipped { relative: &'a Path },
    /// The destination itself was found inside the source tree.
    OutputSkipped { relative: &'a Path },
    /// A symlink to a directory was not followed.
    SymlinkNotFollowed { relative: &'a Path },
    /// A matched file was opened for transcription.
    FileOpened {
        relative: &'a Path,
        size: Option<u64>,
    },
    /// A matched file was fully transcribed.
    FileCompleted { relative: &'a Path, lines: usize },
    /// A non-fatal problem, such as a flush failure after a successful walk.
    Warning { message: &'a str, error: &'a Error },
    /// The run finished.
    Completed {
        destination: &'a Path,
        files_processed: usize,
        elapsed: Duration,
    },
    /// The run aborted.
    Failed { error: &'a Error },
}

/// Receiver for run diagnostics.
pub trait EventSink {
    fn record(&mut self, event: RunEvent<'_>);
}

/// Sink that forwards events to the `tracing` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: RunEvent<'_>) {
        match event {
            RunEvent::Started {
                source,
                destination,
                exclude_dirs,
                include_exts,
            } => tracing::info!(
                input = %source.display(),
                output = %destination.display(),
                exclude_dirs = ?exclude_dirs,
                include_exts = ?include_exts,
                "Starting contextify"
            ),
            RunEvent::DirectoryExcluded { relative } => {
                tracing::debug!(path = %relative.display(), "Excluding directory")
            }
            RunEvent::FileSkipped { relative } => tracing::debug!(
                path = %relative.display(),
                "Skipping file (extension not included)"
            ),
            RunEvent::OutputSkipped { relative } => {
                tracing::debug!(path = %relative.display(), "Skipping output file")
            }
            RunEvent::SymlinkNotFollowed { relative } => tracing::debug!(
                path = %relative.display(),
                "Not following directory symlink"
            ),
            RunEvent::FileOpened { relative, size } => match size {
                Some(size) => {
                    tracing::debug!(path = %relative.display(), size, "Processing file")
                }
                None => tracing::debug!(path = %relative.display(), "Processing file"),
            },
            RunEvent::FileCompleted { relative, lines } => {
                tracing::debug!(path = %relative.display(), lines, "File processed")
            }
            RunEvent::Warning { message, error } => tracing::warn!(error = %error, "{}", message),
            RunEvent::Completed {
                destination,
                files_processed,
                elapsed,
            } => tracing::info!(
                output = %destination.display(),
                files_processed,
                elapsed = %humantime::format_duration(round_to_millis(elapsed)),
                "Successfully created context file"
            ),
            RunEvent::Failed { error } => {
                tracing::error!(error = %error, "Failed to process directory")
            }
        }
    }
}

fn round_to_millis(elapsed: Duration) -> Duration {
    Duration::from_millis(elapsed.as_millis().min(u64::MAX as u128) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_millis() {
        assert_eq!(
            round_to_millis(Duration::from_micros(12_345)),
            Duration::from_millis(12)
        );
        let formatted = humantime::format_duration(round_to_millis(Duration::from_micros(1_500_250)));
        assert_eq!(formatted.to_string(), "1s 500ms");
    }

    #[test]
    fn test_tracing_sink_accepts_every_event() {
        // No subscriber is installed; this only checks that recording never panics.
        let mut sink = TracingSink;
        let rel = Path::new("src/main.go");
        let error = Error::NotADirectory {
            path: "file.txt".into(),
        };
        sink.record(RunEvent::DirectoryExcluded { relative: rel });
        sink.record(RunEvent::FileOpened {
            relative: rel,
            size: Some(10),
        });
        sink.record(RunEvent::FileOpened {
            relative: rel,
            size: None,
        });
        sink.record(RunEvent::Warning {
            message: "Failed to flush output",
            error: &error,
        });
        sink.record(RunEvent::Failed { error: &error });
    }
}
