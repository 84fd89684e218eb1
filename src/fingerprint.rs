//! Movie fingerprinting module
//!
//! This module computes the SubDB content hash of a video file: the MD5
//! digest of the first and last 64KB of the file, concatenated. The provider
//! uses the same scheme, so the hash doubles as the lookup key.

use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of bytes sampled from each end of the file
const SAMPLE_SIZE: usize = 64 * 1024;

/// Errors that can occur while fingerprinting a movie file
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// Failed to open the movie file for reading
    #[error("Failed to open {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// Failed to seek or read while sampling the file
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Computes the SubDB hash of a movie file
///
/// The hash is the MD5 digest of the first 64KB of the file followed by its
/// last 64KB, encoded as a 32-character lowercase hexadecimal string. For
/// files between 64KB and 128KB the two samples overlap; that overlap is part
/// of the hashing scheme and matches what the provider computes on its side.
/// Files shorter than 64KB cannot be sampled from the end and produce a
/// `Read` error from the failed seek.
///
/// The file is opened read-only and closed on every exit path.
///
/// # Arguments
///
/// * `path` - Path to the movie file to fingerprint
///
/// # Returns
///
/// The lowercase hex fingerprint string, or an error if the file cannot be
/// opened or sampled.
///
/// # Examples
///
/// ```ignore
/// let hash = subdb_hash(Path::new("movie.mkv"))?;
/// assert_eq!(hash.len(), 32);
/// ```
pub fn subdb_hash(path: &Path) -> Result<String, FingerprintError> {
    let mut file = File::open(path).map_err(|e| FingerprintError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut data = Vec::with_capacity(2 * SAMPLE_SIZE);

    file.by_ref()
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut data)
        .map_err(|e| FingerprintError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    file.seek(SeekFrom::End(-(SAMPLE_SIZE as i64)))
        .map_err(|e| FingerprintError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    file.by_ref()
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut data)
        .map_err(|e| FingerprintError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut hasher = Md5::new();
    hasher.update(&data);

    Ok(format!("{:x}", hasher.finalize()))
}
