//! Author model matching the Scopus Author Search API.

use serde::{Deserialize, Serialize};

use super::search::lenient_u32;

/// An author search hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorEntry {
    /// `AUTHOR_ID:<digits>`.
    #[serde(rename = "dc:identifier", default)]
    pub identifier: Option<String>,

    /// Preferred name block.
    #[serde(rename = "preferred-name", default)]
    pub preferred_name: Option<PreferredName>,

    /// Number of documents indexed for the author (sent as a string).
    #[serde(rename = "document-count", default, deserialize_with = "lenient_u32")]
    pub document_count: Option<u32>,
}

/// Name parts of an author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferredName {
    /// Family name.
    #[serde(default)]
    pub surname: Option<String>,

    /// Given name.
    #[serde(rename = "given-name", default)]
    pub given_name: Option<String>,

    /// Initials.
    #[serde(default)]
    pub initials: Option<String>,
}

impl AuthorEntry {
    /// Numeric author ID parsed from `dc:identifier`.
    #[must_use]
    pub fn author_id(&self) -> Option<u64> {
        let raw = self.identifier.as_deref()?;
        raw.strip_prefix("AUTHOR_ID:").unwrap_or(raw).trim().parse().ok()
    }

    /// Convert into a profile, falling back to `fallback_id` if the entry has no usable ID.
    #[must_use]
    pub fn into_profile(self, fallback_id: u64) -> AuthorProfile {
        let id = self.author_id().unwrap_or(fallback_id);
        let name = self.preferred_name.unwrap_or_default();
        AuthorProfile {
            id,
            surname: name.surname.unwrap_or_default(),
            given_name: name.given_name.or(name.initials).unwrap_or_default(),
            document_count: self.document_count.unwrap_or(0),
        }
    }
}

/// The researcher whose impact is being measured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    /// Scopus author ID.
    pub id: u64,

    /// Family name.
    pub surname: String,

    /// Given name (or initials).
    pub given_name: String,

    /// Documents indexed for the author.
    pub document_count: u32,
}

impl AuthorProfile {
    /// "Surname Given" display name, or "Unknown" when both parts are missing.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.surname, self.given_name);
        let name = name.trim();
        if name.is_empty() { "Unknown".to_string() } else { name.to_string() }
    }
}
