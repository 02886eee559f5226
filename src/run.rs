//! One flattening run: open the output, write the header, walk, close.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::RunConfig;
use crate::error::Result;
use crate::events::{EventSink, RunEvent};
use crate::output::OutputAssembler;
use crate::tree::{TreeWalker, WalkStats};

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub lines_written: usize,
    pub directories_excluded: usize,
    pub files_skipped: usize,
    pub elapsed: Duration,
}

/// Flatten `config.source()` into `config.destination()`.
///
/// Failures are reported to `sink` once before being returned.
pub fn run(config: &RunConfig, sink: &mut dyn EventSink) -> Result<RunSummary> {
    let started = Instant::now();
    sink.record(RunEvent::Started {
        source: config.source(),
        destination: config.destination(),
        exclude_dirs: config.exclude_dirs(),
        include_exts: config.include_exts(),
    });

    let result = flatten(config, sink).map(|stats| RunSummary {
        files_processed: stats.files_processed,
        lines_written: stats.lines_written,
        directories_excluded: stats.directories_excluded,
        files_skipped: stats.files_skipped,
        elapsed: started.elapsed(),
    });

    match &result {
        Ok(summary) => sink.record(RunEvent::Completed {
            destination: config.destination(),
            files_processed: summary.files_processed,
            elapsed: summary.elapsed,
        }),
        Err(error) => sink.record(RunEvent::Failed { error }),
    }
    result
}

fn flatten(config: &RunConfig, sink: &mut dyn EventSink) -> Result<WalkStats> {
    let output = OutputAssembler::open(config.destination())?;
    flatten_into(config, output, sink)
}

/// Write the header and walk into `output`, then close it.
fn flatten_into<W: Write>(
    config: &RunConfig,
    mut output: OutputAssembler<W>,
    sink: &mut dyn EventSink,
) -> Result<WalkStats> {
    let walked = write_contents(config, &mut output, sink);

    // Close on every path; a close failure never replaces the walk's outcome.
    if let Err(error) = output.close() {
        sink.record(RunEvent::Warning {
            message: "Failed to flush output file",
            error: &error,
        });
    }
    walked
}

fn write_contents<W: Write>(
    config: &RunConfig,
    output: &mut OutputAssembler<W>,
    sink: &mut dyn EventSink,
) -> Result<WalkStats> {
    output.write_run_header(config.source(), config.exclude_dirs(), config.include_exts())?;

    let mut walker = TreeWalker::new(config);
    if let Some(path) = destination_within(config.source(), config.destination()) {
        walker = walker.with_skip_path(path);
    }
    walker.walk(config.source(), output, sink)
}

/// Where the destination would be met during the walk, if it lies inside
/// `source`. Must be called after the destination has been created.
fn destination_within(source: &Path, destination: &Path) -> Option<PathBuf> {
    let source_canonical = fs::canonicalize(source).ok()?;
    let destination_canonical = fs::canonicalize(destination).ok()?;
    let relative = destination_canonical.strip_prefix(&source_canonical).ok()?;
    Some(source.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::test_utils::{RecordingSink, TestTree};
    use std::io;

    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_run_writes_header_and_sections() {
        let tree = TestTree::new();
        tree.add_file("src/a.go", "package a");
        let out_dir = TestTree::new();
        let dest = out_dir.path().join("context.txt");

        let config = RunConfig::new(tree.path(), &dest, Vec::new(), strings(&[".go"])).unwrap();
        let mut sink = RecordingSink::default();
        let summary = run(&config, &mut sink).unwrap();

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.lines_written, 1);

        let expected = format!(
            "# Contextify Output\n\
             # Generated from: {}\n\
             # Excluded directories: .git\n\
             # Included extensions: .go\n\
             \n\
             ## File: src/a.go\n```\npackage a\n```\n\n",
            tree.path().display()
        );
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), expected);
        assert_eq!(sink.events().first().unwrap(), &format!("started {}", tree.path().display()));
        assert_eq!(sink.events().last().unwrap(), "finished (1 files)");
    }

    #[test]
    fn test_destination_inside_source_is_skipped() {
        let tree = TestTree::new();
        tree.add_file("main.go", "package main\n");
        let dest = tree.path().join("context.txt");

        let config = RunConfig::new(tree.path(), &dest, Vec::new(), Vec::new()).unwrap();
        let first = run(&config, &mut RecordingSink::default()).unwrap();
        let first_output = std::fs::read(&dest).unwrap();
        let second = run(&config, &mut RecordingSink::default()).unwrap();
        let second_output = std::fs::read(&dest).unwrap();

        assert_eq!(first.files_processed, 1);
        assert_eq!(second.files_processed, 1);
        assert_eq!(first_output, second_output);
    }

    #[test]
    fn test_uncreatable_output_fails_before_walk() {
        let tree = TestTree::new();
        tree.add_file("main.go", "package main\n");
        let dest = tree.path().join("missing/dir/context.txt");

        let config = RunConfig::new(tree.path(), &dest, Vec::new(), Vec::new()).unwrap();
        let mut sink = RecordingSink::default();
        let err = run(&config, &mut sink).err().unwrap();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(!sink.events().iter().any(|e| e.contains("main.go")));
        assert!(sink.events().last().unwrap().starts_with("failed: "));
    }

    #[test]
    fn test_missing_source_leaves_header_only() {
        let tree = TestTree::new();
        let dest = tree.path().join("context.txt");
        let config =
            RunConfig::new(tree.path().join("absent"), &dest, Vec::new(), Vec::new()).unwrap();

        let err = run(&config, &mut RecordingSink::default()).err().unwrap();
        assert!(matches!(err, Error::Metadata { .. }), "{:?}", err);
        assert_eq!(err.kind(), ErrorKind::Traversal);

        let written = std::fs::read_to_string(&dest).unwrap();
        assert!(written.starts_with("# Contextify Output\n"));
        assert!(!written.contains("## File:"));
    }

    #[test]
    fn test_flush_failure_after_walk_is_a_warning() {
        let tree = TestTree::new();
        tree.add_file("main.go", "package main\n");
        let config =
            RunConfig::new(tree.path(), "unused.txt", Vec::new(), Vec::new()).unwrap();

        let mut sink = RecordingSink::default();
        let output = OutputAssembler::from_writer("out.txt", FailingFlush);
        let stats = flatten_into(&config, output, &mut sink).unwrap();

        assert_eq!(stats.files_processed, 1);
        assert!(
            sink.events()
                .iter()
                .any(|e| e.starts_with("warning: Failed to flush output file")),
            "{:?}",
            sink.events()
        );
    }

    #[test]
    fn test_walk_error_outranks_flush_failure() {
        let tree = TestTree::new();
        let config = RunConfig::new(tree.path().join("absent"), "unused.txt", Vec::new(), Vec::new())
            .unwrap();

        let mut sink = RecordingSink::default();
        let output = OutputAssembler::from_writer("out.txt", FailingFlush);
        let err = flatten_into(&config, output, &mut sink).err().unwrap();

        assert!(matches!(err, Error::Metadata { .. }), "{:?}", err);
        assert!(
            sink.events()
                .iter()
                .any(|e| e.starts_with("warning: Failed to flush output file"))
        );
    }
}
