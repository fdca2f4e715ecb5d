//! Subject listing source for catalog aggregation.
//!
//! Production builds fetch per-genre subject pages from the OpenLibrary
//! API; tests substitute an in-memory implementation of [`SubjectSource`].

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Failure while retrieving or decoding a subject listing. Never retried
/// here; the caller decides whether the condition is worth surfacing as
/// "try again later".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("subject listing for '{genre}' unavailable: {message}")]
    Upstream { genre: String, message: String },
}

impl FetchError {
    pub fn upstream(genre: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            genre: genre.into(),
            message: message.into(),
        }
    }
}

/// One author entry on a raw work record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthor {
    pub name: String,
}

/// A raw work record as returned by the subject listing source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWork {
    /// Opaque per-work identity key, used for dedup across genres
    pub key: String,
    pub title: String,
    pub cover_edition_key: Option<String>,
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub authors: Vec<RawAuthor>,
    #[serde(default)]
    pub subject: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SubjectPage {
    works: Vec<RawWork>,
}

/// Per-genre listing retrieval. One call per vocabulary genre; no side
/// effects beyond the external call.
#[async_trait]
pub trait SubjectSource: Send + Sync {
    async fn fetch(&self, genre: &str) -> Result<Vec<RawWork>, FetchError>;
}

/// Live OpenLibrary subjects API client.
pub struct OpenLibrarySource {
    client: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl OpenLibrarySource {
    pub fn new(base_url: impl Into<String>, limit: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            limit,
        }
    }
}

#[async_trait]
impl SubjectSource for OpenLibrarySource {
    async fn fetch(&self, genre: &str) -> Result<Vec<RawWork>, FetchError> {
        let url = format!("{}/subjects/{}.json?limit={}", self.base_url, genre, self.limit);

        tracing::debug!(genre, %url, "fetching subject listing");

        let page = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| FetchError::upstream(genre, e.to_string()))?
            .json::<SubjectPage>()
            .await
            .map_err(|e| FetchError::upstream(genre, e.to_string()))?;

        Ok(page.works)
    }
}
