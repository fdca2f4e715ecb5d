use serde::{Deserialize, Serialize};

/// Local catalog identifier, assigned densely from 1 at build time.
/// Stable only within one cache lifetime.
pub type BookId = u32;

/// Fixed genre vocabulary, in merge order. Closed set, never extended
/// at runtime.
pub const GENRES: [&str; 3] = ["humor", "fantasy", "literature"];

/// A normalized catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Name of the first author listed by the source record
    pub authors: String,
    pub edition_number: Option<String>,
    pub publish_year: Option<i32>,
    /// Vocabulary genres carried by the source record, order-preserving,
    /// no duplicates; may be empty
    pub genre: Vec<String>,
}

/// The deduplicated, normalized in-memory catalog for the current
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Look up a book by its local id
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Optional predicates applied as an AND when listing books.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    pub genre: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
}

/// Response model for the genre listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<String>,
}

/// Response model for the book listing endpoint. Filter values are
/// echoed back, `"all"` when a field was absent.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookListResponse {
    pub genre: String,
    pub author: String,
    pub title: String,
    pub books: Vec<Book>,
}
