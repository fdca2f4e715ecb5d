//! Catalog construction: fetch, merge, dedup, normalize.

use std::collections::HashSet;
use std::sync::Arc;

use super::models::{Book, BookId, Catalog, GENRES};
use super::source::{FetchError, RawWork, SubjectSource};

/// Builds a catalog by fetching every vocabulary genre from the subject
/// source and merging the results.
pub struct CatalogBuilder {
    source: Arc<dyn SubjectSource>,
}

impl CatalogBuilder {
    pub fn new(source: Arc<dyn SubjectSource>) -> Self {
        Self { source }
    }

    /// Fetch all three genres concurrently and merge into a single
    /// deduplicated catalog. Any single fetch failure aborts the whole
    /// build; no partial catalog is ever produced.
    pub async fn build(&self) -> Result<Catalog, FetchError> {
        let (humor, fantasy, literature) = tokio::try_join!(
            self.source.fetch(GENRES[0]),
            self.source.fetch(GENRES[1]),
            self.source.fetch(GENRES[2]),
        )?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut books: Vec<Book> = Vec::new();

        // Merge in vocabulary order; first occurrence of a key wins,
        // later duplicates are dropped entirely (cross-genre included).
        for work in humor.into_iter().chain(fantasy).chain(literature) {
            if !seen.insert(work.key.clone()) {
                continue;
            }

            let Some(author) = work.authors.first() else {
                tracing::warn!(key = %work.key, title = %work.title, "skipping work without authors");
                continue;
            };

            books.push(Book {
                id: books.len() as BookId + 1,
                title: work.title.clone(),
                authors: author.name.clone(),
                edition_number: work.cover_edition_key.clone(),
                publish_year: work.first_publish_year,
                genre: normalize_genres(&work),
            });
        }

        tracing::info!(books = books.len(), "catalog built");

        Ok(Catalog::new(books))
    }
}

/// Lower-case every subject tag and keep only vocabulary members,
/// preserving source order and dropping duplicates.
fn normalize_genres(work: &RawWork) -> Vec<String> {
    let mut genres = Vec::new();
    for tag in &work.subject {
        let tag = tag.to_lowercase();
        if GENRES.contains(&tag.as_str()) && !genres.contains(&tag) {
            genres.push(tag);
        }
    }
    genres
}
