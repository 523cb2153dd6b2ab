//! Embedded table model.
//!
//! A bundle is an immutable tree of [`BundleEntry`] values, normally emitted
//! by a build-time generator as a `static` and borrowed for the life of the
//! process. Sibling order is slice order; nothing is ever mutated or freed
//! individually.
//!
//! ```
//! use filebundle::BundleEntry;
//!
//! static TABLE: BundleEntry<'static> = BundleEntry::dir("", &[
//!     BundleEntry::dir("webui", &[
//!         BundleEntry::file("index.html", b"<html></html>"),
//!     ]),
//! ]);
//!
//! let webui = TABLE.lookup_dir("webui").unwrap();
//! assert_eq!(webui.children().len(), 1);
//! ```

use crate::error::{BundleError, BundleResult};
use crate::types::FileType;

/// Payload of a bundle entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind<'b> {
    /// Directory with ordered children.
    Directory { children: &'b [BundleEntry<'b>] },
    /// File bytes as stored. `original_size` is the uncompressed length
    /// when the generator gzipped the entry, `None` when stored plain.
    File {
        data: &'b [u8],
        original_size: Option<u64>,
    },
}

/// A file or directory node in the embedded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleEntry<'b> {
    name: &'b str,
    kind: EntryKind<'b>,
}

impl<'b> BundleEntry<'b> {
    /// A directory node.
    pub const fn dir(name: &'b str, children: &'b [BundleEntry<'b>]) -> Self {
        Self {
            name,
            kind: EntryKind::Directory { children },
        }
    }

    /// A file stored uncompressed.
    pub const fn file(name: &'b str, data: &'b [u8]) -> Self {
        Self {
            name,
            kind: EntryKind::File {
                data,
                original_size: None,
            },
        }
    }

    /// A file stored as a gzip member of `original_size` uncompressed bytes.
    pub const fn gzip_file(name: &'b str, data: &'b [u8], original_size: u64) -> Self {
        Self {
            name,
            kind: EntryKind::File {
                data,
                original_size: Some(original_size),
            },
        }
    }

    pub fn name(&self) -> &'b str {
        self.name
    }

    pub fn kind(&self) -> &EntryKind<'b> {
        &self.kind
    }

    pub fn file_type(&self) -> FileType {
        match self.kind {
            EntryKind::Directory { .. } => FileType::Directory,
            EntryKind::File { .. } => FileType::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    /// Children in table order; empty for files.
    pub fn children(&self) -> &'b [BundleEntry<'b>] {
        match self.kind {
            EntryKind::Directory { children } => children,
            EntryKind::File { .. } => &[],
        }
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&'b BundleEntry<'b>> {
        self.children().iter().find(|e| e.name == name)
    }

    /// Stored bytes of a file; empty for directories.
    pub fn data(&self) -> &'b [u8] {
        match self.kind {
            EntryKind::File { data, .. } => data,
            EntryKind::Directory { .. } => &[],
        }
    }

    /// Stored (possibly compressed) length.
    pub fn size(&self) -> u64 {
        self.data().len() as u64
    }

    /// Uncompressed length, if the entry was gzipped at build time.
    pub fn original_size(&self) -> Option<u64> {
        match self.kind {
            EntryKind::File { original_size, .. } => original_size,
            EntryKind::Directory { .. } => None,
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.original_size().is_some()
    }

    /// Walk `path` from this node, one directory per `/`-separated segment.
    ///
    /// Empty segments are skipped, so `""`, `"/"` and `"a//b/"` are all
    /// accepted. Every segment must name a child directory.
    pub fn lookup_dir(&'b self, path: &str) -> BundleResult<&'b BundleEntry<'b>> {
        let mut node = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            node = match node.child(segment) {
                Some(next) if next.is_dir() => next,
                Some(_) => return Err(BundleError::not_a_directory(path)),
                None => return Err(BundleError::not_found(path)),
            };
        }
        Ok(node)
    }
}
