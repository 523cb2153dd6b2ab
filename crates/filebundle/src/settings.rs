//! Data root configuration.
//!
//! Relative paths resolve against a data root when one is configured and
//! against the embedded bundle when not. The root is asked for on every
//! open, so a provider may change its answer at runtime.
//!
//! Settings are stored as RON:
//!
//! ```ron
//! (
//!     data_root: Some("/usr/share/myapp"),
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BundleError, BundleResult};

/// Supplies the real-filesystem root for relative paths.
pub trait DataRoot {
    /// `None` means relative paths are looked up in the bundle.
    fn data_root(&self) -> Option<PathBuf>;
}

/// Always serve relative paths from the bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDataRoot;

impl DataRoot for NoDataRoot {
    fn data_root(&self) -> Option<PathBuf> {
        None
    }
}

impl DataRoot for PathBuf {
    fn data_root(&self) -> Option<PathBuf> {
        Some(self.clone())
    }
}

impl DataRoot for Option<PathBuf> {
    fn data_root(&self) -> Option<PathBuf> {
        self.clone()
    }
}

impl<T: DataRoot + ?Sized> DataRoot for &T {
    fn data_root(&self) -> Option<PathBuf> {
        (**self).data_root()
    }
}

/// File-backed settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory that relative paths resolve against.
    pub data_root: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from RON text.
    pub fn from_ron_str(text: &str) -> BundleResult<Self> {
        ron::from_str(text).map_err(|e| BundleError::config(e.to_string()))
    }

    /// Read and parse a RON settings file.
    pub fn load(path: impl AsRef<Path>) -> BundleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BundleError::config(format!("{}: {e}", path.display())))?;
        Self::from_ron_str(&text)
    }

    /// Override the data root.
    pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_root = Some(root.into());
        self
    }
}

impl DataRoot for Settings {
    fn data_root(&self) -> Option<PathBuf> {
        self.data_root.clone()
    }
}
