//! In-memory subject source for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::source::{FetchError, RawAuthor, RawWork, SubjectSource};

/// Canned per-genre listings with a fetch-call counter.
pub(crate) struct FakeSource {
    pages: HashMap<&'static str, Vec<RawWork>>,
    failing: Option<&'static str>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn new(pages: Vec<(&'static str, Vec<RawWork>)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            failing: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing_on(genre: &'static str) -> Self {
        Self {
            pages: HashMap::new(),
            failing: Some(genre),
            calls: AtomicUsize::new(0),
        }
    }

    /// Total number of fetch calls issued against this source.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SubjectSource for FakeSource {
    async fn fetch(&self, genre: &str) -> Result<Vec<RawWork>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(genre) {
            return Err(FetchError::upstream(genre, "connection refused"));
        }
        Ok(self.pages.get(genre).cloned().unwrap_or_default())
    }
}

pub(crate) fn work(key: &str, title: &str, author: &str, subjects: &[&str]) -> RawWork {
    RawWork {
        key: key.to_string(),
        title: title.to_string(),
        cover_edition_key: Some(format!("{key}-ed")),
        first_publish_year: Some(1990),
        authors: vec![RawAuthor {
            name: author.to_string(),
        }],
        subject: subjects.iter().map(|s| s.to_string()).collect(),
    }
}
