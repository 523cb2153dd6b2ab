//! Path resolution across the bundle and the real filesystem.
//!
//! Routing rules:
//!
//! - A path starting with `/` always means the real filesystem.
//! - Any other path goes to the data root when the provider returns one,
//!   and to the embedded bundle otherwise.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::bundle::BundleEntry;
use crate::dir::Dir;
use crate::error::{BundleError, BundleResult};
use crate::file::BundleFile;
use crate::settings::{DataRoot, NoDataRoot};
use crate::types::{DirEntry, OpenFlags};

/// Entry point: opens directories and files by path.
#[derive(Debug, Clone)]
pub struct FileBundle<'b, R = NoDataRoot> {
    table: &'b BundleEntry<'b>,
    root: R,
}

impl<'b> FileBundle<'b, NoDataRoot> {
    /// Serve relative paths from `table` only.
    pub fn new(table: &'b BundleEntry<'b>) -> Self {
        Self {
            table,
            root: NoDataRoot,
        }
    }
}

impl<'b, R: DataRoot> FileBundle<'b, R> {
    /// Serve relative paths from whatever `root` reports at open time.
    pub fn with_data_root(table: &'b BundleEntry<'b>, root: R) -> Self {
        Self { table, root }
    }

    /// Root node of the embedded table.
    pub fn table(&self) -> &'b BundleEntry<'b> {
        self.table
    }

    /// The provider consulted for relative paths.
    pub fn data_root(&self) -> &R {
        &self.root
    }

    /// Open a directory for listing.
    pub fn open_dir(&self, path: &str) -> BundleResult<Dir<'b>> {
        if path.starts_with('/') {
            return Dir::direct(PathBuf::from(path));
        }

        match self.root.data_root() {
            Some(root) => {
                let relative = Path::new(path);
                if relative
                    .components()
                    .any(|c| matches!(c, Component::ParentDir))
                {
                    return Err(BundleError::path_escapes_root(path));
                }
                debug!(root = %root.display(), path, "resolving against data root");
                Dir::direct(root.join(relative))
            }
            None => {
                debug!(path, "resolving against bundle");
                self.table.lookup_dir(path).map(Dir::bundle)
            }
        }
    }

    /// Open a file by full path, e.g. `"webui/static/app.js"`.
    ///
    /// The path is split at its last `/`; a path without one is rejected.
    pub fn open(&self, path: &str, flags: OpenFlags) -> BundleResult<BundleFile<'b>> {
        flags.validate()?;
        let (dir, name) = split_path(path)?;
        self.open_dir(dir)?.open_file(name, flags)
    }

    /// Collect a whole directory listing.
    pub fn read_dir(&self, path: &str) -> BundleResult<Vec<DirEntry>> {
        Ok(self.open_dir(path)?.collect())
    }

    /// Read a whole file.
    pub fn read(&self, path: &str, flags: OpenFlags) -> BundleResult<Vec<u8>> {
        self.open(path, flags)?.read_to_end()
    }
}

/// Split `path` into its directory part and leaf name.
fn split_path(path: &str) -> BundleResult<(&str, &str)> {
    let (dir, name) = path
        .rsplit_once('/')
        .ok_or_else(|| BundleError::invalid_path(format!("{path}: no directory")))?;
    if name.is_empty() {
        return Err(BundleError::invalid_path(format!("{path}: no file name")));
    }
    if dir.is_empty() && path.starts_with('/') {
        return Ok(("/", name));
    }
    Ok((dir, name))
}
