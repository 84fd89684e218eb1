//! Subtitle retrieval module
//!
//! This module provides the types and traits for talking to a subtitle
//! provider: the catalog of language codes the provider supports, and the
//! trait implemented by concrete provider clients.

mod subdb;

pub use subdb::SubDbProvider;

use std::fmt;
use std::io::Read;
use thiserror::Error;

/// Errors that can occur while talking to the subtitle provider
#[derive(Debug, Error)]
pub enum SubtitleRetrievalError {
    /// The request could not be performed or the response body could not
    /// be read
    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    /// The provider answered a download request with a non-success status,
    /// meaning it has no subtitle for this hash/language pair
    #[error("{url}: {status}")]
    SubtitleUnavailable { url: String, status: String },
}

/// The ordered set of language codes the provider currently supports
///
/// Parsed from the provider's comma-separated response body. Order and
/// duplicates are preserved exactly as received; nothing is sorted or
/// deduplicated. Membership is plain string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog(Vec<String>);

impl LanguageCatalog {
    /// Parses a catalog from a comma-separated body.
    ///
    /// Trailing empty segments (from trailing commas or an empty body) are
    /// dropped; interior empty segments are kept.
    pub(crate) fn from_csv(body: &str) -> Self {
        let mut codes: Vec<String> = body.split(',').map(str::to_string).collect();

        while codes.last().is_some_and(|code| code.is_empty()) {
            codes.pop();
        }

        Self(codes)
    }

    /// Returns true when the catalog contains exactly this code
    pub fn supports(&self, language: &str) -> bool {
        self.0.iter().any(|code| code == language)
    }

    /// Returns the codes in the order the provider listed them
    pub fn codes(&self) -> &[String] {
        &self.0
    }
}

/// Displays the catalog as a comma-joined list, for error messages
impl fmt::Display for LanguageCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Trait for subtitle providers that support hash-based lookup
///
/// Implementors expose the provider's two operations: listing the supported
/// language codes and requesting a subtitle download as a byte stream. The
/// trait is the seam that lets tests run the whole download flow against
/// deterministic fakes instead of the live network.
pub trait SubtitleProvider {
    /// Fetches the catalog of language codes the provider supports
    fn supported_languages(&self) -> Result<LanguageCatalog, SubtitleRetrievalError>;

    /// Requests the subtitle for the given movie hash and language code
    ///
    /// # Arguments
    ///
    /// * `hash` - The 32-character lowercase hex fingerprint of the movie
    /// * `language` - The language code to download
    ///
    /// # Returns
    ///
    /// A readable stream over the raw subtitle bytes, or
    /// `SubtitleUnavailable` when the provider has nothing for this
    /// hash/language pair.
    fn request_subtitle(
        &self,
        hash: &str,
        language: &str,
    ) -> Result<Box<dyn Read>, SubtitleRetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = LanguageCatalog::from_csv("en,pt,fr");
        assert_eq!(catalog.codes(), ["en", "pt", "fr"]);
    }

    #[test]
    fn test_catalog_preserves_duplicates() {
        let catalog = LanguageCatalog::from_csv("en,en,pt");
        assert_eq!(catalog.codes(), ["en", "en", "pt"]);
    }

    #[test]
    fn test_catalog_drops_trailing_empties_keeps_interior() {
        assert_eq!(LanguageCatalog::from_csv("en,pt,,").codes(), ["en", "pt"]);
        assert_eq!(LanguageCatalog::from_csv("en,,pt").codes(), ["en", "", "pt"]);
        assert!(LanguageCatalog::from_csv("").codes().is_empty());
    }

    #[test]
    fn test_catalog_membership_is_exact() {
        let catalog = LanguageCatalog::from_csv("en,pt");
        assert!(catalog.supports("en"));
        assert!(!catalog.supports("EN"));
        assert!(!catalog.supports("es"));
        assert!(!catalog.supports(""));
    }

    #[test]
    fn test_catalog_display_joins_codes() {
        let catalog = LanguageCatalog::from_csv("en,pt,fr");
        assert_eq!(catalog.to_string(), "en, pt, fr");
    }
}
