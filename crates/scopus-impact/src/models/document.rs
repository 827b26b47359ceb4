//! Citing document model matching the Scopus Search API (COMPLETE view).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::search::lenient_u32;

/// A document returned by a `REFAUID(...)` search, i.e. one that cites the researcher.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitingDocument {
    /// Electronic identifier (`2-s2.0-...`).
    #[serde(default)]
    pub eid: Option<String>,

    /// Document title.
    #[serde(rename = "dc:title", default)]
    pub title: Option<String>,

    /// Journal, book or proceedings name.
    #[serde(rename = "prism:publicationName", default)]
    pub publication_name: Option<String>,

    /// Source type: Journal, Conference Proceeding, Book Series, ...
    #[serde(rename = "prism:aggregationType", default)]
    pub aggregation_type: Option<String>,

    /// Cover date in ISO format (YYYY-MM-DD).
    #[serde(rename = "prism:coverDate", default)]
    pub cover_date: Option<String>,

    /// Times this document has itself been cited.
    #[serde(rename = "citedby-count", default, deserialize_with = "lenient_u32")]
    pub cited_by_count: Option<u32>,

    /// Author list. Absent for some document types and for STANDARD-view responses.
    #[serde(default)]
    pub author: Option<Vec<DocumentAuthor>>,
}

/// One entry of a document's author list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentAuthor {
    /// Position in the byline (sent as a string).
    #[serde(rename = "@seq", default, deserialize_with = "lenient_u32")]
    pub seq: Option<u32>,

    /// Scopus author ID.
    #[serde(default)]
    pub authid: Option<String>,

    /// Indexed name, e.g. "Smith J.".
    #[serde(default)]
    pub authname: Option<String>,
}

impl CitingDocument {
    /// Author IDs in byline order.
    ///
    /// Returns `None` when the author list is missing or empty, or when any
    /// entry lacks a numeric ID; such documents cannot be classified.
    #[must_use]
    pub fn author_ids(&self) -> Option<Vec<u64>> {
        let authors = self.author.as_ref().filter(|a| !a.is_empty())?;

        let mut ordered: Vec<&DocumentAuthor> = authors.iter().collect();
        ordered.sort_by_key(|a| a.seq.unwrap_or(u32::MAX));

        ordered
            .into_iter()
            .map(|a| a.authid.as_deref()?.trim().parse::<u64>().ok())
            .collect()
    }

    /// Author names joined with `;`, as Scopus exports them.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.author
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|a| a.authname.as_deref())
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Parsed cover date.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.cover_date.as_deref()?.trim(), "%Y-%m-%d").ok()
    }

    /// Publication year taken from the cover date.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date().map(|d| d.year())
    }

    /// Get the title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Get the source title or an empty string.
    #[must_use]
    pub fn publication_name_or_default(&self) -> &str {
        self.publication_name.as_deref().unwrap_or("")
    }

    /// Get the source type or "Unknown".
    #[must_use]
    pub fn aggregation_type_or_default(&self) -> &str {
        self.aggregation_type.as_deref().unwrap_or("Unknown")
    }
}
