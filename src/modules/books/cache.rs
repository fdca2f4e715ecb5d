//! Process-wide catalog cache.
//!
//! The catalog is built lazily on first access and held for the process
//! lifetime; there is no invalidation or refresh path. Concurrent first
//! callers coalesce onto a single in-flight build so the external source
//! is never fetched twice for the same catalog.

use std::sync::Arc;

use tokio::sync::OnceCell;

use super::builder::CatalogBuilder;
use super::models::Catalog;
use super::source::FetchError;

enum Inner {
    /// Built on demand through the builder; the cell holds the result.
    Lazy {
        builder: CatalogBuilder,
        cell: OnceCell<Arc<Catalog>>,
    },
    /// Offline mode: the static dataset is already the final catalog.
    Preloaded(Arc<Catalog>),
}

/// Single source of truth for "current books".
pub struct CatalogCache {
    inner: Inner,
}

impl CatalogCache {
    /// Cache that builds from the subject source on first access.
    pub fn lazy(builder: CatalogBuilder) -> Self {
        Self {
            inner: Inner::Lazy {
                builder,
                cell: OnceCell::new(),
            },
        }
    }

    /// Cache pre-populated with a final catalog; the builder path is
    /// bypassed entirely.
    pub fn preloaded(catalog: Catalog) -> Self {
        Self {
            inner: Inner::Preloaded(Arc::new(catalog)),
        }
    }

    /// Return the cached catalog, building it first if absent. A failed
    /// build leaves the cache empty, so a later call may try again.
    pub async fn get(&self) -> Result<Arc<Catalog>, FetchError> {
        match &self.inner {
            Inner::Preloaded(catalog) => Ok(catalog.clone()),
            Inner::Lazy { builder, cell } => {
                let catalog = cell
                    .get_or_try_init(|| async {
                        tracing::info!("catalog absent, building from subject listings");
                        builder.build().await.map(Arc::new)
                    })
                    .await?;
                Ok(catalog.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::{Book, GENRES};
    use crate::modules::books::testing::{work, FakeSource};

    fn lazy_cache_with_counter() -> (Arc<FakeSource>, CatalogCache) {
        let source = Arc::new(FakeSource::new(vec![
            ("humor", vec![work("/works/A", "A", "Ann", &["Humor"])]),
            ("fantasy", vec![work("/works/B", "B", "Bob", &["Fantasy"])]),
            ("literature", vec![]),
        ]));
        let cache = CatalogCache::lazy(CatalogBuilder::new(source.clone()));
        (source, cache)
    }

    #[tokio::test]
    async fn repeated_gets_build_only_once() {
        let (source, cache) = lazy_cache_with_counter();

        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();

        assert_eq!(first.books(), second.books());
        // One fetch per vocabulary genre, across both calls
        assert_eq!(source.calls(), GENRES.len());
    }

    #[tokio::test]
    async fn concurrent_first_access_coalesces_builds() {
        let (source, cache) = lazy_cache_with_counter();
        let cache = Arc::new(cache);

        let (a, b) = tokio::join!(cache.get(), cache.get());
        assert_eq!(a.unwrap().books(), b.unwrap().books());
        assert_eq!(source.calls(), GENRES.len());
    }

    #[tokio::test]
    async fn failed_build_leaves_cache_retryable() {
        let source = Arc::new(FakeSource::failing_on("literature"));
        let cache = CatalogCache::lazy(CatalogBuilder::new(source.clone()));

        assert!(cache.get().await.is_err());
        // The second attempt fetches again instead of caching the failure
        assert!(cache.get().await.is_err());
        assert!(source.calls() > GENRES.len());
    }

    #[tokio::test]
    async fn preloaded_cache_never_touches_the_source() {
        let cache = CatalogCache::preloaded(Catalog::new(vec![Book {
            id: 1,
            title: "Offline".to_string(),
            authors: "Nobody".to_string(),
            edition_number: None,
            publish_year: None,
            genre: vec!["humor".to_string()],
        }]));

        let catalog = cache.get().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find(1).unwrap().title, "Offline");
    }
}
