//! Error types for a flattening run
//!
//! Every failure is fatal to the run. Variants carry the offending path and
//! the underlying I/O error so the top level can report them once.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum Error {
    /// The source path could not be made absolute.
    #[error("failed to resolve source path {path}: {source}")]
    SourcePath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination could not be created or truncated.
    #[error("failed to create output file {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be listed.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A node's metadata could not be read.
    #[error("failed to access {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source root exists but is not a directory.
    #[error("source {path} is not a directory")]
    NotADirectory { path: PathBuf },

    /// A matched file could not be opened.
    #[error("failed to open file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A matched file failed mid-read.
    #[error("error reading file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single line exceeded the configured bound.
    #[error("line {line} of {path} exceeds the maximum line size of {limit} bytes")]
    LineTooLong {
        path: PathBuf,
        line: usize,
        limit: usize,
    },

    /// Writing to the output stream failed.
    #[error("failed to write to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Flushing buffered output on close failed.
    #[error("failed to flush {path}: {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised before traversal starts.
    Configuration,
    /// Listing or inspecting the tree failed.
    Traversal,
    /// A matched file could not be transcribed.
    Transcription,
    /// The destination stream failed.
    Output,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourcePath { .. } | Self::CreateOutput { .. } => ErrorKind::Configuration,
            Self::ReadDir { .. } | Self::Metadata { .. } | Self::NotADirectory { .. } => {
                ErrorKind::Traversal
            }
            Self::OpenFile { .. } | Self::ReadFile { .. } | Self::LineTooLong { .. } => {
                ErrorKind::Transcription
            }
            Self::Write { .. } | Self::Flush { .. } => ErrorKind::Output,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
