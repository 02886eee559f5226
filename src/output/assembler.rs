//! OutputAssembler - owns the destination stream for a run
//!
//! Opening yields an assembler in the open state; `close` consumes it, so no
//! write can follow a close. If the assembler is dropped on an error path the
//! buffered writer is still flushed and the file released.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const BANNER: &str = "# Contextify Output";
const FENCE: &str = "```";

/// Sequential writer for the flattened output.
pub struct OutputAssembler<W: Write> {
    destination: PathBuf,
    writer: W,
    sections: usize,
}

impl OutputAssembler<BufWriter<File>> {
    /// Create or truncate the destination file.
    pub fn open(destination: &Path) -> Result<Self> {
        let file = File::create(destination).map_err(|e| Error::CreateOutput {
            path: destination.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_writer(destination, BufWriter::new(file)))
    }
}

impl<W: Write> OutputAssembler<W> {
    /// Wrap an arbitrary writer. `destination` is only used in error messages.
    pub fn from_writer(destination: impl Into<PathBuf>, writer: W) -> Self {
        Self {
            destination: destination.into(),
            writer,
            sections: 0,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Number of file sections written so far.
    pub fn sections(&self) -> usize {
        self.sections
    }

    /// Write the comment banner that precedes all file sections.
    ///
    /// The inclusion line is omitted when `include_exts` is empty.
    pub fn write_run_header(
        &mut self,
        source: &Path,
        exclude_dirs: &[String],
        include_exts: &[String],
    ) -> Result<()> {
        let mut header = format!(
            "{}\n# Generated from: {}\n# Excluded directories: {}\n",
            BANNER,
            source.display(),
            exclude_dirs.join(", ")
        );
        if !include_exts.is_empty() {
            header.push_str("# Included extensions: ");
            header.push_str(&include_exts.join(", "));
            header.push('\n');
        }
        header.push('\n');

        self.write_bytes(header.as_bytes())
    }

    /// Start a file section: path header and opening fence.
    pub fn begin_file(&mut self, relative: &Path) -> Result<()> {
        let opening = format!("## File: {}\n{}\n", relative.display(), FENCE);
        self.write_bytes(opening.as_bytes())
    }

    /// Write one line of content followed by a single `\n`.
    pub fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.write_bytes(line)?;
        self.write_bytes(b"\n")
    }

    /// Close a file section with the closing fence and a blank line.
    pub fn end_file(&mut self) -> Result<()> {
        self.write_bytes(FENCE.as_bytes())?;
        self.write_bytes(b"\n\n")?;
        self.sections += 1;
        Ok(())
    }

    /// Flush buffered output and hand back the underlying writer.
    pub fn close(mut self) -> Result<W> {
        self.writer.flush().map_err(|e| Error::Flush {
            path: self.destination.clone(),
            source: e,
        })?;
        Ok(self.writer)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(|e| Error::Write {
            path: self.destination.clone(),
            source: e,
        })
    }
}
