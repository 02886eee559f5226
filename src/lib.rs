//! Contextify - flatten a source tree into a single annotated context file

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod run;
pub mod string_utils;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{DEFAULT_MAX_LINE_BYTES, RunConfig, VCS_DIR};
pub use error::{Error, ErrorKind, Result};
pub use events::{EventSink, RunEvent, TracingSink};
pub use matcher::PathMatcher;
pub use output::{FileTranscriber, OutputAssembler};
pub use run::{RunSummary, run};
pub use tree::{TreeWalker, WalkStats};
