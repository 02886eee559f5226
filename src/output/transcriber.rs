//! FileTranscriber - streams one file into the output
//!
//! Content is copied line by line as raw bytes. Line terminators are
//! normalized to `\n`, and a file without a trailing newline still gets one.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::events::{EventSink, RunEvent};

use super::assembler::OutputAssembler;

/// Copies matched files into an [`OutputAssembler`].
#[derive(Debug, Clone, Copy)]
pub struct FileTranscriber {
    max_line_bytes: usize,
}

impl FileTranscriber {
    /// `max_line_bytes` bounds a single line, excluding its terminator.
    pub fn new(max_line_bytes: usize) -> Self {
        Self { max_line_bytes }
    }

    /// Transcribe `path` under the header `relative`, returning the number
    /// of lines written.
    pub fn transcribe<W: Write>(
        &self,
        path: &Path,
        relative: &Path,
        output: &mut OutputAssembler<W>,
        sink: &mut dyn EventSink,
    ) -> Result<usize> {
        let file = File::open(path).map_err(|e| Error::OpenFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size = file.metadata().ok().map(|m| m.len());
        sink.record(RunEvent::FileOpened { relative, size });

        output.begin_file(relative)?;
        let lines = self.copy_lines(BufReader::new(file), path, output)?;
        output.end_file()?;

        sink.record(RunEvent::FileCompleted { relative, lines });
        Ok(lines)
    }

    fn copy_lines<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        path: &Path,
        output: &mut OutputAssembler<W>,
    ) -> Result<usize> {
        // Room for the content plus a "\r\n" terminator.
        let chunk = (self.max_line_bytes as u64).saturating_add(2);
        let mut buf = Vec::new();
        let mut lines = 0;

        loop {
            buf.clear();
            let read = (&mut reader)
                .take(chunk)
                .read_until(b'\n', &mut buf)
                .map_err(|e| Error::ReadFile {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }

            let line = strip_line_terminator(&buf);
            if line.len() > self.max_line_bytes {
                return Err(Error::LineTooLong {
                    path: path.to_path_buf(),
                    line: lines + 1,
                    limit: self.max_line_bytes,
                });
            }

            output.write_line(line)?;
            lines += 1;
        }

        Ok(lines)
    }
}

/// Drop a trailing `\n`, then a trailing `\r`.
fn strip_line_terminator(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_LINE_BYTES;
    use crate::test_utils::RecordingSink;
    use std::fs;
    use tempfile::TempDir;

    fn transcribe_bytes(content: &[u8], max_line_bytes: usize) -> Result<(usize, String)> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, content).unwrap();

        let mut output = OutputAssembler::from_writer("memory", Vec::new());
        let mut sink = RecordingSink::default();
        let lines = FileTranscriber::new(max_line_bytes).transcribe(
            &path,
            Path::new("input.txt"),
            &mut output,
            &mut sink,
        )?;
        let text = String::from_utf8_lossy(&output.close().unwrap()).to_string();
        Ok((lines, text))
    }

    #[test]
    fn test_trailing_newline_preserved() {
        let (lines, text) = transcribe_bytes(b"one\ntwo\n", DEFAULT_MAX_LINE_BYTES).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(text, "## File: input.txt\n```\none\ntwo\n```\n\n");
    }

    #[test]
    fn test_missing_trailing_newline_appended() {
        let (lines, text) = transcribe_bytes(b"one\ntwo", DEFAULT_MAX_LINE_BYTES).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(text, "## File: input.txt\n```\none\ntwo\n```\n\n");
    }

    #[test]
    fn test_crlf_normalized() {
        let (lines, text) = transcribe_bytes(b"a\r\nb\r\n", DEFAULT_MAX_LINE_BYTES).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(text, "## File: input.txt\n```\na\nb\n```\n\n");
    }

    #[test]
    fn test_empty_file() {
        let (lines, text) = transcribe_bytes(b"", DEFAULT_MAX_LINE_BYTES).unwrap();
        assert_eq!(lines, 0);
        assert_eq!(text, "## File: input.txt\n```\n```\n\n");
    }

    #[test]
    fn test_blank_lines_kept() {
        let (lines, text) = transcribe_bytes(b"\n\nx\n", DEFAULT_MAX_LINE_BYTES).unwrap();
        assert_eq!(lines, 3);
        assert_eq!(text, "## File: input.txt\n```\n\n\nx\n```\n\n");
    }

    #[test]
    fn test_non_utf8_bytes_copied_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, b'\n', 0x00, 0x80]).unwrap();

        let mut output = OutputAssembler::from_writer("memory", Vec::new());
        let mut sink = RecordingSink::default();
        let lines = FileTranscriber::new(DEFAULT_MAX_LINE_BYTES)
            .transcribe(&path, Path::new("blob.bin"), &mut output, &mut sink)
            .unwrap();
        assert_eq!(lines, 2);

        let bytes = output.close().unwrap();
        let header = b"## File: blob.bin\n```\n";
        assert!(bytes.starts_with(header));
        assert_eq!(
            &bytes[header.len()..],
            &[0xff, 0xfe, b'\n', 0x00, 0x80, b'\n', b'`', b'`', b'`', b'\n', b'\n']
        );
    }

    #[test]
    fn test_line_at_limit_accepted() {
        let (lines, _) = transcribe_bytes(b"12345\r\n12345", 5).unwrap();
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_line_over_limit_rejected() {
        let err = transcribe_bytes(b"ok\n123456\n", 5).err().unwrap();
        match err {
            Error::LineTooLong { line, limit, .. } => {
                assert_eq!(line, 2);
                assert_eq!(limit, 5);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unbounded_limit_keeps_lines_whole() {
        let (lines, text) = transcribe_bytes(b"ab\ncd", usize::MAX).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(text, "## File: input.txt\n```\nab\ncd\n```\n\n");
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let dir = TempDir::new().unwrap();
        let mut output = OutputAssembler::from_writer("memory", Vec::new());
        let mut sink = RecordingSink::default();
        let err = FileTranscriber::new(DEFAULT_MAX_LINE_BYTES)
            .transcribe(
                &dir.path().join("gone.txt"),
                Path::new("gone.txt"),
                &mut output,
                &mut sink,
            )
            .err()
            .unwrap();
        assert!(matches!(err, Error::OpenFile { .. }), "{:?}", err);
        // Nothing is written for a file that cannot be opened
        assert!(output.close().unwrap().is_empty());
    }

    #[test]
    fn test_events_recorded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.go");
        fs::write(&path, "package a\n").unwrap();

        let mut output = OutputAssembler::from_writer("memory", Vec::new());
        let mut sink = RecordingSink::default();
        FileTranscriber::new(DEFAULT_MAX_LINE_BYTES)
            .transcribe(&path, Path::new("a.go"), &mut output, &mut sink)
            .unwrap();

        assert_eq!(
            sink.events(),
            &["opened a.go (10 bytes)".to_string(), "completed a.go (1 lines)".to_string()]
        );
    }
}
