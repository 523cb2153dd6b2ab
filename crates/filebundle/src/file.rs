//! Open file handles.
//!
//! A [`BundleFile`] reads from exactly one source: a buffered OS stream, the
//! bundle's bytes borrowed in place, or a buffer it owns because the content
//! was inflated, deflated or slurped from disk at open time. Callers see the
//! same `size` / `read` / `read_line` surface either way.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::bundle::BundleEntry;
use crate::compress;
use crate::error::{BundleError, BundleResult};
use crate::types::{Backend, OpenFlags};

/// Where the exposed bytes come from.
#[derive(Debug)]
enum Source<'b> {
    /// Direct file, read lazily.
    Stream(BufReader<File>),
    /// Borrowed bundle bytes, or a materialized buffer.
    Bytes(Cow<'b, [u8]>),
}

/// An open file from either backend.
#[derive(Debug)]
pub struct BundleFile<'b> {
    backend: Backend,
    source: Source<'b>,
    size: u64,
    compressed: bool,
    pos: u64,
}

impl<'b> BundleFile<'b> {
    /// Open a bundle file entry.
    pub(crate) fn from_entry(entry: &'b BundleEntry<'b>, flags: OpenFlags) -> BundleResult<Self> {
        flags.validate()?;

        let mut file = Self {
            backend: Backend::Bundle,
            source: Source::Bytes(Cow::Borrowed(entry.data())),
            size: entry.size(),
            compressed: entry.is_compressed(),
            pos: 0,
        };

        if let Some(original_size) = entry.original_size() {
            if flags.decompress {
                debug!(name = entry.name(), original_size, "inflating bundle entry");
                let data = compress::decompress(entry.data(), original_size)?;
                file.source = Source::Bytes(Cow::Owned(data));
                file.size = original_size;
                file.compressed = false;
            }
        } else if flags.compress {
            debug!(name = entry.name(), size = entry.size(), "deflating bundle entry");
            file.materialize_compressed(entry.data())?;
        }

        Ok(file)
    }

    /// Open a file on the real filesystem.
    pub(crate) fn from_path(path: &Path, flags: OpenFlags) -> BundleResult<Self> {
        flags.validate()?;

        let handle = File::open(path).map_err(|e| BundleError::from_io(path, e))?;
        let meta = handle
            .metadata()
            .map_err(|e| BundleError::from_io(path, e))?;
        if meta.is_dir() {
            return Err(BundleError::is_a_directory(path.display().to_string()));
        }

        let size = meta.len();
        if flags.compress {
            debug!(path = %path.display(), size, "deflating direct file");
            let data = read_exact_len(handle, size).map_err(|e| BundleError::from_io(path, e))?;
            let mut file = Self {
                backend: Backend::Direct,
                source: Source::Bytes(Cow::Owned(Vec::new())),
                size,
                compressed: false,
                pos: 0,
            };
            file.materialize_compressed(&data)?;
            return Ok(file);
        }

        debug!(path = %path.display(), size, "streaming direct file");
        Ok(Self {
            backend: Backend::Direct,
            source: Source::Stream(BufReader::new(handle)),
            size,
            compressed: false,
            pos: 0,
        })
    }

    /// Replace the source with the gzip form of `plain`.
    fn materialize_compressed(&mut self, plain: &[u8]) -> BundleResult<()> {
        let gz = compress::compress(plain)?;
        self.size = gz.len() as u64;
        self.compressed = true;
        self.source = Source::Bytes(Cow::Owned(gz));
        Ok(())
    }

    /// Effective size of the exposed bytes (after any inflate or deflate).
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether the exposed bytes are a gzip stream.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// True once every exposed byte has been read.
    pub fn at_end(&self) -> bool {
        self.pos >= self.size
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Read up to `buf.len()` bytes.
    ///
    /// Returns `Ok(None)` at end of file, never `Some(0)` for a non-empty
    /// buffer. A short count is not an error.
    pub fn read(&mut self, buf: &mut [u8]) -> BundleResult<Option<usize>> {
        if self.at_end() {
            return Ok(None);
        }

        match &mut self.source {
            Source::Bytes(bytes) => {
                let start = usize::try_from(self.pos).map_err(io::Error::other)?;
                let count = buf.len().min(bytes.len().saturating_sub(start));
                buf[..count].copy_from_slice(&bytes[start..start + count]);
                self.pos += count as u64;
                Ok(Some(count))
            }
            Source::Stream(reader) => {
                let remaining = usize::try_from(self.size - self.pos).unwrap_or(usize::MAX);
                let want = buf.len().min(remaining);
                let count = reader.read(&mut buf[..want])?;
                if count == 0 && want > 0 {
                    // File shrank since open; stop here.
                    self.size = self.pos;
                    return Ok(None);
                }
                self.pos += count as u64;
                Ok(Some(count))
            }
        }
    }

    /// Read one line of at most `max_len` bytes.
    ///
    /// Stops after consuming `\n` or NUL (neither is returned) or once
    /// `max_len` bytes are stored. Returns `Ok(None)` only if the file was
    /// already at its end; a line cut short by end of file is returned as is.
    pub fn read_line(&mut self, max_len: usize) -> BundleResult<Option<Vec<u8>>> {
        if self.at_end() {
            return Ok(None);
        }

        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        let mut first = true;

        while line.len() < max_len {
            match self.read(&mut byte)? {
                Some(_) => {}
                None if first => return Ok(None),
                None => break,
            }
            first = false;
            if byte[0] == b'\n' || byte[0] == 0 {
                break;
            }
            line.push(byte[0]);
        }

        Ok(Some(line))
    }

    /// Read everything from the cursor to the end.
    pub fn read_to_end(&mut self) -> BundleResult<Vec<u8>> {
        let remaining = usize::try_from(self.size.saturating_sub(self.pos)).unwrap_or(0);
        let mut out = Vec::with_capacity(remaining);
        let mut chunk = [0u8; 8192];
        while let Some(n) = self.read(&mut chunk)? {
            out.extend_from_slice(&chunk[..n]);
        }
        Ok(out)
    }

    /// Release the handle and whatever it owns.
    pub fn close(self) {
        trace!(backend = ?self.backend, pos = self.pos, size = self.size, "closing file");
    }
}

impl Read for BundleFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(BundleFile::read(self, buf)?.unwrap_or(0))
    }
}

/// Read exactly `size` bytes, treating a short file as an error.
fn read_exact_len(mut handle: File, size: u64) -> io::Result<Vec<u8>> {
    let len = usize::try_from(size).map_err(io::Error::other)?;
    let mut data = vec![0u8; len];
    handle.read_exact(&mut data)?;
    Ok(data)
}
