//! Output writing
//!
//! `OutputAssembler` owns the destination and its format (run header, file
//! sections, fences); `FileTranscriber` streams a single file's lines into it.

mod assembler;
mod transcriber;

pub use assembler::OutputAssembler;
pub use transcriber::FileTranscriber;
