//! Depth-first traversal primitive.
//!
//! Nodes are visited in pre-order with siblings sorted by file name. The
//! visitor steers the walk by returning [`WalkControl::SkipSubtree`] for a
//! directory it does not want entered. Any error listing or inspecting the
//! tree aborts the whole walk.

use std::fs::{self, DirEntry, FileType};
use std::path::Path;

use crate::error::{Error, Result};

/// Relative path reported for the source root itself.
pub const ROOT_RELATIVE: &str = ".";

/// Visitor decision for the node just visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Keep going; directories are entered.
    Continue,
    /// Do not enter this directory. Ignored for non-directories.
    SkipSubtree,
}

/// What a node is, without following symlinks into directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    /// A symlink whose target is a directory. Never entered.
    DirectorySymlink,
    /// Anything else, including symlinks to files and dangling symlinks.
    File,
}

/// A node handed to the visitor.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    /// Absolute path (the root joined with `relative`).
    pub path: &'a Path,
    /// Path relative to the root; the root itself is `.`.
    pub relative: &'a Path,
    /// 0 for the root.
    pub depth: usize,
    pub kind: NodeKind,
}

/// Callback for each node of the tree.
pub trait Visitor {
    fn visit(&mut self, node: &Node<'_>) -> Result<WalkControl>;
}

/// Walk `root` depth-first, root first.
pub fn walk_depth_first<V: Visitor + ?Sized>(root: &Path, visitor: &mut V) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|e| Error::Metadata {
        path: root.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let node = Node {
        path: root,
        relative: Path::new(ROOT_RELATIVE),
        depth: 0,
        kind: NodeKind::Directory,
    };
    if visitor.visit(&node)? == WalkControl::SkipSubtree {
        return Ok(());
    }

    walk_children(root, Path::new(""), 1, visitor)
}

fn walk_children<V: Visitor + ?Sized>(
    dir: &Path,
    relative_dir: &Path,
    depth: usize,
    visitor: &mut V,
) -> Result<()> {
    for entry in read_sorted_entries(dir)? {
        let path = entry.path();
        let relative = relative_dir.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| Error::Metadata {
            path: path.clone(),
            source: e,
        })?;
        let kind = classify(&path, file_type);

        let node = Node {
            path: &path,
            relative: &relative,
            depth,
            kind,
        };
        let control = visitor.visit(&node)?;

        if kind == NodeKind::Directory && control == WalkControl::Continue {
            walk_children(&path, &relative, depth + 1, visitor)?;
        }
    }
    Ok(())
}

/// Read a directory's entries sorted by file name.
fn read_sorted_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    let read_dir_error = |e: std::io::Error| Error::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_dir_error)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_dir_error)?;
    entries.sort_by_key(|a| a.file_name());
    Ok(entries)
}

fn classify(path: &Path, file_type: FileType) -> NodeKind {
    if file_type.is_dir() {
        NodeKind::Directory
    } else if file_type.is_symlink() && path.is_dir() {
        NodeKind::DirectorySymlink
    } else {
        NodeKind::File
    }
}
