//! TreeWalker - prunes, filters and transcribes while walking the tree

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::RunConfig;
use crate::error::Result;
use crate::events::{EventSink, RunEvent};
use crate::matcher::PathMatcher;
use crate::output::{FileTranscriber, OutputAssembler};

use super::traversal::{Node, NodeKind, Visitor, WalkControl, walk_depth_first};

/// Counters gathered during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub files_processed: usize,
    pub lines_written: usize,
    pub directories_excluded: usize,
    pub files_skipped: usize,
}

/// Walks the source tree and transcribes every matched file into the output.
pub struct TreeWalker<'a> {
    matcher: PathMatcher<'a>,
    transcriber: FileTranscriber,
    skip_path: Option<PathBuf>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            matcher: PathMatcher::new(config.exclude_set(), config.include_set()),
            transcriber: FileTranscriber::new(config.max_line_bytes()),
            skip_path: None,
        }
    }

    /// Never transcribe the file at `path` (used for the output file itself).
    pub fn with_skip_path(mut self, path: PathBuf) -> Self {
        self.skip_path = Some(path);
        self
    }

    /// Walk `root`, writing each matched file into `output`.
    ///
    /// The first error aborts the walk; sections already written stay in
    /// `output`.
    pub fn walk<W: Write>(
        &self,
        root: &Path,
        output: &mut OutputAssembler<W>,
        sink: &mut dyn EventSink,
    ) -> Result<WalkStats> {
        let mut visitor = FlattenVisitor {
            walker: self,
            output,
            sink,
            stats: WalkStats::default(),
        };
        walk_depth_first(root, &mut visitor)?;
        Ok(visitor.stats)
    }
}

struct FlattenVisitor<'w, 'a, W: Write> {
    walker: &'w TreeWalker<'a>,
    output: &'w mut OutputAssembler<W>,
    sink: &'w mut dyn EventSink,
    stats: WalkStats,
}

impl<W: Write> FlattenVisitor<'_, '_, W> {
    fn visit_directory(&mut self, node: &Node<'_>) -> WalkControl {
        if self.walker.matcher.should_exclude_directory(node.relative) {
            self.sink.record(RunEvent::DirectoryExcluded {
                relative: node.relative,
            });
            self.stats.directories_excluded += 1;
            return WalkControl::SkipSubtree;
        }
        WalkControl::Continue
    }

    fn visit_file(&mut self, node: &Node<'_>) -> Result<()> {
        if self.walker.skip_path.as_deref() == Some(node.path) {
            self.sink.record(RunEvent::OutputSkipped {
                relative: node.relative,
            });
            return Ok(());
        }

        if !self.walker.matcher.should_include_file(node.path) {
            self.sink.record(RunEvent::FileSkipped {
                relative: node.relative,
            });
            self.stats.files_skipped += 1;
            return Ok(());
        }

        let lines = self.walker.transcriber.transcribe(
            node.path,
            node.relative,
            &mut *self.output,
            &mut *self.sink,
        )?;
        self.stats.files_processed += 1;
        self.stats.lines_written += lines;
        Ok(())
    }
}

impl<W: Write> Visitor for FlattenVisitor<'_, '_, W> {
    fn visit(&mut self, node: &Node<'_>) -> Result<WalkControl> {
        match node.kind {
            NodeKind::Directory => Ok(self.visit_directory(node)),
            NodeKind::DirectorySymlink => {
                self.sink.record(RunEvent::SymlinkNotFollowed {
                    relative: node.relative,
                });
                Ok(WalkControl::SkipSubtree)
            }
            NodeKind::File => {
                self.visit_file(node)?;
                Ok(WalkControl::Continue)
            }
        }
    }
}
