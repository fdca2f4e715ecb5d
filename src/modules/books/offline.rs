//! Offline catalog snapshot loading.
//!
//! In offline mode a static, pre-merged dataset stands in for the
//! per-genre fetch/merge/dedup pipeline. The file holds the final
//! catalog shape directly.

use std::path::Path;

use anyhow::Context;

use super::models::{Book, Catalog};

/// Load the offline dataset from `path` as the final catalog.
pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Catalog> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read offline dataset at {}", path.display()))?;

    let books: Vec<Book> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to decode offline dataset at {}", path.display()))?;

    tracing::info!(books = books.len(), path = %path.display(), "offline catalog loaded");

    Ok(Catalog::new(books))
}
