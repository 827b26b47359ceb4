//! Data models for Scopus API entities.
//!
//! Scopus sends most numbers as strings and prefixes keys with their
//! namespace (`dc:`, `prism:`, `opensearch:`), so fields are renamed
//! individually and numeric ones are parsed leniently.

mod author;
mod document;
mod enums;
mod search;

pub use author::{AuthorEntry, AuthorProfile, PreferredName};
pub use document::{CitingDocument, DocumentAuthor};
pub use enums::{CitationClass, OutputFormat};
pub use search::{Cursor, SearchResponse, SearchResults};
