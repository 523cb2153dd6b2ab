//! Uniform file access over an embedded bundle or a real directory.
//!
//! Programs that ship their static assets compiled in, but still want to
//! serve a development checkout from disk, open everything through
//! [`FileBundle`]. Callers list directories and read bytes the same way
//! whichever backend answers.
//!
//! Key components:
//!
//! - [`BundleEntry`] - Immutable embedded table of files and directories
//! - [`FileBundle`] - Routes a path to the bundle or the data root
//! - [`Dir`] - Forward-only directory listing
//! - [`BundleFile`] - File handle with byte and line reads
//! - [`compress`] - gzip inflate/deflate on whole buffers
//! - [`Settings`] / [`DataRoot`] - Where relative paths live on disk
//!
//! ## Compression
//!
//! Bundle entries may be stored gzipped. Opening with
//! [`OpenFlags::decompress`] inflates them eagerly; [`OpenFlags::compress`]
//! gzips plain content from either backend so it can be re-served with
//! `Content-Encoding: gzip`. Passing both is rejected.
//!
//! ```
//! use filebundle::{BundleEntry, FileBundle, OpenFlags};
//!
//! static TABLE: BundleEntry<'static> = BundleEntry::dir("", &[
//!     BundleEntry::dir("docs", &[
//!         BundleEntry::file("intro.txt", b"first line\nsecond line\n"),
//!     ]),
//! ]);
//!
//! let fb = FileBundle::new(&TABLE);
//! let mut file = fb.open("docs/intro.txt", OpenFlags::raw()).unwrap();
//! assert_eq!(file.read_line(80).unwrap().unwrap(), b"first line");
//! ```

pub mod bundle;
pub mod compress;
mod dir;
mod error;
mod file;
mod resolver;
mod settings;
mod types;

pub use bundle::{BundleEntry, EntryKind};
pub use dir::Dir;
pub use error::{BundleError, BundleResult};
pub use file::BundleFile;
pub use resolver::FileBundle;
pub use settings::{DataRoot, NoDataRoot, Settings};
pub use types::{Backend, DirEntry, FileType, OpenFlags};
