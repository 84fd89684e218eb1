/// SubDB provider implementation.
use super::{LanguageCatalog, SubtitleProvider, SubtitleRetrievalError};
use reqwest::header;
use std::io::Read;

/// Base URL of the SubDB API
const SUBDB_API_URL: &str = "http://api.thesubdb.com";

/// Identifying client header the SubDB API requires on every request
const SUBDB_USER_AGENT: &str = "SubDB/1.0 (subtitle-downloader/1.0;";

/// Subtitle provider for the SubDB API.
///
/// SubDB looks subtitles up by a content hash of the movie file, so requests
/// carry the hash rather than a title. Responses are plain text: the
/// language catalog is a comma-separated list and a subtitle download is the
/// raw file body.
pub struct SubDbProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SubDbProvider {
    /// Creates a new SubDB provider instance.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: SUBDB_API_URL.to_string(),
        }
    }

    fn languages_url(&self) -> String {
        format!("{}/?action=languages", self.base_url)
    }

    fn download_url(&self, hash: &str, language: &str) -> String {
        format!(
            "{}/?action=download&hash={}&language={}",
            self.base_url, hash, language
        )
    }
}

impl Default for SubDbProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleProvider for SubDbProvider {
    fn supported_languages(&self) -> Result<LanguageCatalog, SubtitleRetrievalError> {
        let url = self.languages_url();

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, SUBDB_USER_AGENT)
            .send()
            .map_err(|e| SubtitleRetrievalError::RequestFailed {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        // The status line is not consulted here: whatever body the provider
        // returns is parsed as the catalog.
        let body = response
            .text()
            .map_err(|e| SubtitleRetrievalError::RequestFailed {
                url,
                reason: e.to_string(),
            })?;

        Ok(LanguageCatalog::from_csv(&body))
    }

    fn request_subtitle(
        &self,
        hash: &str,
        language: &str,
    ) -> Result<Box<dyn Read>, SubtitleRetrievalError> {
        let url = self.download_url(hash, language);

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, SUBDB_USER_AGENT)
            .send()
            .map_err(|e| SubtitleRetrievalError::RequestFailed {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SubtitleRetrievalError::SubtitleUnavailable {
                url,
                status: response.status().to_string(),
            });
        }

        Ok(Box::new(response))
    }
}
