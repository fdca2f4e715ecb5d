//! Bookdesk Application Library
//!
//! Aggregates a book catalog from the OpenLibrary subjects API (or an
//! offline snapshot) and books pickup appointments against it.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;
