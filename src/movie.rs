//! Movie file model
//!
//! This module represents the movie file handed to the downloader and owns
//! the path-level rules around it: the existence and regular-file checks,
//! the known-extension list, and the derivation of the subtitle path.

use std::path::PathBuf;
use thiserror::Error;

/// Extension appended to the movie's base name to form the subtitle path
const SUBTITLE_EXTENSION: &str = "srt";

/// File extensions recognized as movies, lowercase, including the dot.
/// The `.3gp.` entry is kept verbatim from the historical list, so `.3gp`
/// files fall through to the confirmation prompt.
pub(crate) const KNOWN_MOVIE_EXTENSIONS: &[&str] = &[
    ".avi", ".mp4", ".mkv", ".mpg",
    ".mpeg", ".mov", ".rm", ".vob",
    ".wmv", ".flv", ".3gp.", ".3g2",
];

/// Errors that can occur while validating the movie path
#[derive(Debug, Error)]
pub enum MovieError {
    /// The movie path does not exist
    #[error("File {0} doesn't exist")]
    NotFound(PathBuf),

    /// The movie path exists but is not a regular file
    #[error("File {0} isn't a regular file")]
    NotARegularFile(PathBuf),
}

/// Represents the movie file a subtitle is requested for
///
/// The file is read-only to this system: it is sampled for fingerprinting
/// but never modified or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFile {
    /// Path to the movie file
    pub path: PathBuf,
}

impl MovieFile {
    /// Creates a new movie file handle for the given path (no I/O)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensures the movie path exists and points at a regular file
    pub fn ensure_regular_file(&self) -> Result<(), MovieError> {
        if !self.path.exists() {
            return Err(MovieError::NotFound(self.path.clone()));
        }

        if !self.path.is_file() {
            return Err(MovieError::NotARegularFile(self.path.clone()));
        }

        Ok(())
    }

    /// Returns the movie's extension, lowercase and including the dot,
    /// or an empty string when the file name has no extension
    pub fn extension(&self) -> String {
        match self.path.extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
            None => String::new(),
        }
    }

    /// Returns true when the extension is on the known-movie list
    pub fn has_known_extension(&self) -> bool {
        KNOWN_MOVIE_EXTENSIONS.contains(&self.extension().as_str())
    }

    /// Derives the subtitle path for this movie: same directory, same base
    /// name, with the extension replaced by `.srt`
    pub fn subtitle_path(&self) -> PathBuf {
        self.path.with_extension(SUBTITLE_EXTENSION)
    }
}
