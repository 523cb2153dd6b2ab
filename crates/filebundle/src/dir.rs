//! Open directory handles.

use std::fs::{self, ReadDir};
use std::path::{Component, Path, PathBuf};
use std::slice;

use tracing::{debug, trace, warn};

use crate::bundle::BundleEntry;
use crate::error::{BundleError, BundleResult};
use crate::file::BundleFile;
use crate::types::{Backend, DirEntry, FileType, OpenFlags};

#[derive(Debug)]
enum Inner<'b> {
    Bundle {
        node: &'b BundleEntry<'b>,
        cursor: slice::Iter<'b, BundleEntry<'b>>,
    },
    Direct {
        path: PathBuf,
        entries: ReadDir,
    },
}

/// An open directory from either backend.
///
/// Iteration is forward-only: every [`read_entry`](Dir::read_entry)
/// consumes the cursor, and a fresh handle is needed to list again.
#[derive(Debug)]
pub struct Dir<'b> {
    inner: Inner<'b>,
}

impl<'b> Dir<'b> {
    /// List a bundle directory node.
    pub(crate) fn bundle(node: &'b BundleEntry<'b>) -> Self {
        debug!(name = node.name(), children = node.children().len(), "opened bundle directory");
        Self {
            inner: Inner::Bundle {
                node,
                cursor: node.children().iter(),
            },
        }
    }

    /// Open a directory on the real filesystem.
    pub(crate) fn direct(path: PathBuf) -> BundleResult<Self> {
        let entries = fs::read_dir(&path).map_err(|e| BundleError::from_io(&path, e))?;
        debug!(path = %path.display(), "opened direct directory");
        Ok(Self {
            inner: Inner::Direct { path, entries },
        })
    }

    pub fn backend(&self) -> Backend {
        match self.inner {
            Inner::Bundle { .. } => Backend::Bundle,
            Inner::Direct { .. } => Backend::Direct,
        }
    }

    /// Resolved OS path of a direct directory.
    pub fn path(&self) -> Option<&Path> {
        match &self.inner {
            Inner::Bundle { .. } => None,
            Inner::Direct { path, .. } => Some(path),
        }
    }

    /// Next entry, or `None` once the listing is exhausted.
    ///
    /// Direct entries are classified without following symlinks; anything
    /// that is not a plain file or directory, or whose metadata cannot be
    /// read, is [`FileType::Unknown`].
    pub fn read_entry(&mut self) -> Option<DirEntry> {
        match &mut self.inner {
            Inner::Bundle { cursor, .. } => cursor
                .next()
                .map(|entry| DirEntry::new(entry.name(), entry.file_type())),
            Inner::Direct { path, entries } => match entries.next()? {
                Ok(entry) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let kind = fs::symlink_metadata(path.join(&name))
                        .map(|meta| FileType::from_metadata(&meta))
                        .unwrap_or(FileType::Unknown);
                    Some(DirEntry { name, kind })
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "directory read failed");
                    None
                }
            },
        }
    }

    /// Open a file directly inside this directory.
    pub fn open_file(&self, name: &str, flags: OpenFlags) -> BundleResult<BundleFile<'b>> {
        flags.validate()?;
        check_leaf_name(name)?;

        match &self.inner {
            Inner::Bundle { node, .. } => {
                let entry = node
                    .child(name)
                    .ok_or_else(|| BundleError::not_found(name))?;
                if entry.is_dir() {
                    return Err(BundleError::is_a_directory(name));
                }
                BundleFile::from_entry(entry, flags)
            }
            Inner::Direct { path, .. } => BundleFile::from_path(&path.join(name), flags),
        }
    }

    /// Release the handle and its OS directory stream.
    pub fn close(self) {
        trace!(backend = ?self.backend(), "closing directory");
    }
}

/// Accept only a single plain name, so a file can never be opened outside
/// its directory.
fn check_leaf_name(name: &str) -> BundleResult<()> {
    let components: Vec<_> = Path::new(name).components().collect();
    if components
        .iter()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Err(BundleError::path_escapes_root(name));
    }
    match components.as_slice() {
        [Component::Normal(_)] if !name.contains('/') => Ok(()),
        _ => Err(BundleError::invalid_path(format!("{name:?}: not a plain file name"))),
    }
}

impl Iterator for Dir<'_> {
    type Item = DirEntry;

    fn next(&mut self) -> Option<DirEntry> {
        self.read_entry()
    }
}
