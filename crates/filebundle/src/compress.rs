//! gzip adapter.
//!
//! Two whole-buffer operations: inflate to an exactly known size, and
//! deflate at maximum level. Nothing is streamed and no state outlives a call.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;

use crate::error::{BundleError, BundleResult};

/// Inflate a gzip member into exactly `original_size` bytes.
///
/// Fails unless the decoder fills the output completely, the stream ends
/// right there (trailer checksum and length verified), and every input byte
/// was consumed.
pub fn decompress(data: &[u8], original_size: u64) -> BundleResult<Vec<u8>> {
    let len = usize::try_from(original_size)
        .map_err(|_| BundleError::decompress(format!("{original_size} bytes exceeds address space")))?;

    let mut decoder = GzDecoder::new(data);
    let mut out = vec![0u8; len];
    decoder
        .read_exact(&mut out)
        .map_err(|e| BundleError::decompress(format!("expected {len} bytes: {e}")))?;

    // One more read drives the decoder through the trailer.
    let mut probe = [0u8; 1];
    match decoder.read(&mut probe) {
        Ok(0) => {}
        Ok(_) => {
            return Err(BundleError::decompress(format!(
                "stream longer than {len} bytes"
            )));
        }
        Err(e) => return Err(BundleError::decompress(e.to_string())),
    }

    let rest = decoder.into_inner();
    if !rest.is_empty() {
        return Err(BundleError::decompress(format!(
            "{} trailing bytes after gzip member",
            rest.len()
        )));
    }

    Ok(out)
}

/// Deflate `data` into a gzip member at maximum compression.
pub fn compress(data: &[u8]) -> BundleResult<Vec<u8>> {
    if data.is_empty() {
        return Err(BundleError::compress("no input"));
    }

    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len()), Compression::best());
    encoder
        .write_all(data)
        .map_err(|e| BundleError::compress(e.to_string()))?;
    let out = encoder
        .finish()
        .map_err(|e| BundleError::compress(e.to_string()))?;

    if out.is_empty() {
        return Err(BundleError::compress("no output"));
    }
    Ok(out)
}
