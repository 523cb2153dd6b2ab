//! Types shared by both backends.

use crate::error::{BundleError, BundleResult};

/// File type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Anything else, or a direct entry whose metadata could not be read.
    Unknown,
}

impl FileType {
    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileType::File)
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FileType::Directory)
    }

    /// Classify OS metadata obtained without following symlinks.
    pub(crate) fn from_metadata(meta: &std::fs::Metadata) -> Self {
        let ft = meta.file_type();
        if ft.is_dir() {
            FileType::Directory
        } else if ft.is_file() {
            FileType::File
        } else {
            FileType::Unknown
        }
    }
}

/// Which storage a handle reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Embedded read-only table.
    Bundle,
    /// Real filesystem.
    Direct,
}

/// Directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (not full path).
    pub name: String,
    /// Entry type.
    pub kind: FileType,
}

impl DirEntry {
    /// Create a new directory entry.
    pub fn new(name: impl Into<String>, kind: FileType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FileType::File)
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, FileType::Directory)
    }
}

/// How a file should be presented when opened.
///
/// `decompress` only affects bundle entries stored gzip-compressed and is
/// ignored otherwise. `compress` works on either backend and is ignored for
/// content that is already compressed. The two are mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenFlags {
    /// Inflate pre-compressed bundle entries.
    pub decompress: bool,
    /// Gzip plain content in memory.
    pub compress: bool,
}

impl OpenFlags {
    /// Bytes exactly as stored.
    pub fn raw() -> Self {
        Self::default()
    }

    /// Inflate compressed bundle entries.
    pub fn decompress() -> Self {
        Self {
            decompress: true,
            ..Default::default()
        }
    }

    /// Gzip anything not already compressed.
    pub fn compress() -> Self {
        Self {
            compress: true,
            ..Default::default()
        }
    }

    /// Reject flag combinations no backend can honour.
    pub fn validate(&self) -> BundleResult<()> {
        if self.decompress && self.compress {
            Err(BundleError::invalid_request(
                "decompress and compress are mutually exclusive",
            ))
        } else {
            Ok(())
        }
    }
}
