//! SubDB subtitle downloader
//!
//! This library provides the core functionality for locating and downloading
//! a subtitle for a movie file from the SubDB hash database. The movie is
//! identified by a content hash of its first and last 64KB rather than by
//! its filename, so renamed files still resolve to the same subtitle.

mod fingerprint;
mod movie;
mod subtitle_retrieval;

// Re-export error types
pub use fingerprint::FingerprintError;
pub use movie::MovieError;
pub use subtitle_retrieval::SubtitleRetrievalError;

pub use fingerprint::subdb_hash;
pub use movie::MovieFile;
pub use subtitle_retrieval::{LanguageCatalog, SubDbProvider, SubtitleProvider};

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for subtitle download operations
///
/// Every variant here is fatal to the run: the binary reports it on the
/// error stream and exits non-zero. Failures the flow absorbs without
/// aborting (a subtitle the provider doesn't have, a broken transfer) are
/// not errors but [`FetchOutcome`] values.
#[derive(Debug, Error)]
pub enum SubtitleDownloadError {
    /// The movie path failed validation
    #[error(transparent)]
    Movie(#[from] MovieError),

    /// The movie file could not be fingerprinted
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    /// The language catalog could not be fetched from the provider
    #[error("Failed to fetch the supported languages: {0}")]
    Catalog(#[source] SubtitleRetrievalError),

    /// The requested language is not in the provider's catalog
    #[error("Language {language} isn't supported. Supported languages: {supported}")]
    UnsupportedLanguage {
        language: String,
        supported: LanguageCatalog,
    },

    /// The pre-existing subtitle could not be deleted after the user
    /// approved its deletion
    #[error("Failed to delete the existing subtitle {path}: {source}")]
    DeleteExisting { path: PathBuf, source: io::Error },

    /// The destination subtitle file could not be created
    #[error("Failed to create {path}: {source}")]
    CreateSubtitle { path: PathBuf, source: io::Error },
}

/// Reason a run stopped at a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The movie extension was not recognized and the user declined to
    /// continue
    UnrecognizedExtension,

    /// A subtitle already exists and the user declined to delete it
    ExistingSubtitle,
}

/// A download-phase failure that does not abort the process
#[derive(Debug, Error)]
pub enum DownloadFailure {
    /// The download request could not be performed
    #[error(transparent)]
    Retrieval(#[from] SubtitleRetrievalError),

    /// Streaming the response body into the subtitle file failed
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// The result of a completed download attempt
///
/// Only [`FetchOutcome::Downloaded`] leaves a subtitle behind. The other
/// variants describe how the run ended so the caller can report it; none of
/// them is a process-fatal condition.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The subtitle was downloaded and written to `subtitle_path`
    Downloaded { subtitle_path: PathBuf, bytes: u64 },

    /// The provider has no subtitle for this movie and language; the
    /// destination file was removed
    NotFound {
        movie_path: PathBuf,
        language: String,
        url: String,
        status: String,
    },

    /// The download failed mid-flight; the destination file is left as-is
    Failed { error: DownloadFailure },

    /// The user declined a confirmation prompt; nothing was downloaded
    Aborted(AbortReason),
}

/// Downloads a subtitle for a movie file from the given provider
///
/// The flow validates the movie path, fingerprints the file, checks the
/// derived subtitle path and the requested language, and then streams the
/// subtitle into place:
///
/// 1. The movie must exist and be a regular file. An unrecognized extension
///    is not fatal by itself: the confirmation callback is asked, and a
///    negative answer ends the run as [`FetchOutcome::Aborted`].
/// 2. The file is fingerprinted ([`subdb_hash`]).
/// 3. If the subtitle path already exists, the confirmation callback
///    decides whether the old file is deleted or the run stops.
/// 4. The language must be in the provider's catalog, fetched fresh on
///    every run.
/// 5. The subtitle is streamed into the destination file. A provider
///    "unavailable" answer removes the destination and reports
///    [`FetchOutcome::NotFound`]; any other mid-download failure leaves the
///    destination in place and reports [`FetchOutcome::Failed`].
///
/// Confirmation is injected as a closure so callers decide how to ask (the
/// CLI reads a y/n line from stdin; tests pass canned answers).
///
/// # Arguments
///
/// * `movie_path` - Path to the movie file
/// * `language` - Language code to download, validated against the catalog
/// * `provider` - The subtitle provider to query
/// * `confirm` - Closure called with a prompt; returns whether the user
///   agreed
///
/// # Returns
///
/// A [`FetchOutcome`] describing how the run ended, or a
/// [`SubtitleDownloadError`] for the fatal validation and catalog failures.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use subdb_downloader::{download_subtitle, FetchOutcome, SubDbProvider};
///
/// let provider = SubDbProvider::new();
/// let outcome = download_subtitle(
///     Path::new("/films/heat.mkv"),
///     "en",
///     &provider,
///     |prompt| {
///         println!("{prompt}");
///         true
///     },
/// )
/// .unwrap();
///
/// if let FetchOutcome::Downloaded { subtitle_path, .. } = outcome {
///     println!("saved {}", subtitle_path.display());
/// }
/// ```
pub fn download_subtitle<P, C>(
    movie_path: &Path,
    language: &str,
    provider: &P,
    mut confirm: C,
) -> Result<FetchOutcome, SubtitleDownloadError>
where
    P: SubtitleProvider,
    C: FnMut(&str) -> bool,
{
    let movie = MovieFile::new(movie_path);

    // Existence and regular-file-ness come first: fingerprinting reads the file.
    movie.ensure_regular_file()?;

    if !movie.has_known_extension() {
        let approved = confirm(
            "This file doesn't seem to be a movie. Are you sure you want to continue? [y/n]",
        );
        if !approved {
            return Ok(FetchOutcome::Aborted(AbortReason::UnrecognizedExtension));
        }
    }

    let hash = subdb_hash(&movie.path)?;

    let subtitle_path = movie.subtitle_path();
    if subtitle_path.exists() {
        if !confirm("The movie already has a subtitle. Do you want to delete it? [y/n]") {
            return Ok(FetchOutcome::Aborted(AbortReason::ExistingSubtitle));
        }

        fs::remove_file(&subtitle_path).map_err(|e| SubtitleDownloadError::DeleteExisting {
            path: subtitle_path.clone(),
            source: e,
        })?;
    }

    let catalog = provider
        .supported_languages()
        .map_err(SubtitleDownloadError::Catalog)?;

    if !catalog.supports(language) {
        return Err(SubtitleDownloadError::UnsupportedLanguage {
            language: language.to_string(),
            supported: catalog,
        });
    }

    // The destination is created before the request goes out; the response
    // body streams straight into it.
    let mut subtitle_file =
        File::create(&subtitle_path).map_err(|e| SubtitleDownloadError::CreateSubtitle {
            path: subtitle_path.clone(),
            source: e,
        })?;

    match provider.request_subtitle(&hash, language) {
        Ok(mut stream) => match io::copy(&mut stream, &mut subtitle_file) {
            Ok(bytes) => Ok(FetchOutcome::Downloaded {
                subtitle_path,
                bytes,
            }),
            Err(e) => Ok(FetchOutcome::Failed {
                error: DownloadFailure::Write {
                    path: subtitle_path,
                    source: e,
                },
            }),
        },
        // Not-found is the only failure that removes the destination file.
        Err(SubtitleRetrievalError::SubtitleUnavailable { url, status }) => {
            drop(subtitle_file);
            let _ = fs::remove_file(&subtitle_path);
            Ok(FetchOutcome::NotFound {
                movie_path: movie.path,
                language: language.to_string(),
                url,
                status,
            })
        }
        Err(error) => Ok(FetchOutcome::Failed {
            error: DownloadFailure::Retrieval(error),
        }),
    }
}
