//! Catalog filtering.
//!
//! All predicate fields are optional and ANDed together. Genre is an
//! exact membership check against the book's (lower-case) genre list;
//! author and title are case-insensitive substring checks. An
//! empty-string value counts as absent, same as omitting the field.
//! Results keep catalog order; an empty result is valid output, not a
//! failure.

use super::models::{Book, BookFilter, Catalog};

fn normalize(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Narrow `catalog` to the books matching every supplied predicate.
pub fn filter<'a>(catalog: &'a Catalog, predicate: &BookFilter) -> Vec<&'a Book> {
    let genre = normalize(&predicate.genre);
    let author = normalize(&predicate.author);
    let title = normalize(&predicate.title);

    catalog
        .books()
        .iter()
        .filter(|book| {
            genre
                .as_deref()
                .map_or(true, |g| book.genre.iter().any(|tag| tag == g))
                && author
                    .as_deref()
                    .map_or(true, |a| book.authors.to_lowercase().contains(a))
                && title
                    .as_deref()
                    .map_or(true, |t| book.title.to_lowercase().contains(t))
        })
        .collect()
}
