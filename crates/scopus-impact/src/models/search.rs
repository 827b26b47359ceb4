//! Search envelope shared by the Scopus and author search APIs.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level response body: `{"search-results": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The result page.
    #[serde(rename = "search-results")]
    pub search_results: SearchResults,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    /// Total matches for the query (sent as a string).
    #[serde(rename = "opensearch:totalResults", default, deserialize_with = "lenient_u64")]
    pub total_results: Option<u64>,

    /// Cursor state for deep pagination.
    #[serde(default)]
    pub cursor: Option<Cursor>,

    /// Raw entries. An empty result set arrives as a single `{"error": ...}` entry.
    #[serde(default)]
    pub entry: Vec<serde_json::Value>,
}

impl SearchResults {
    /// Decode the entries, dropping placeholder and malformed ones.
    #[must_use]
    pub fn entries<T: DeserializeOwned>(&self) -> Vec<T> {
        self.entry
            .iter()
            .filter(|e| e.get("error").is_none())
            .filter_map(|e| match serde_json::from_value(e.clone()) {
                Ok(item) => Some(item),
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping undecodable search entry");
                    None
                }
            })
            .collect()
    }

    /// Decode the entries, keeping a default value in place of each malformed one.
    ///
    /// Placeholder entries are still dropped. Positions and counts of real
    /// entries are preserved, so callers can account for what failed to decode.
    #[must_use]
    pub fn entries_or_default<T: DeserializeOwned + Default>(&self) -> Vec<T> {
        self.entry
            .iter()
            .filter(|e| e.get("error").is_none())
            .map(|e| {
                serde_json::from_value(e.clone()).unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "Undecodable search entry, keeping a blank record");
                    T::default()
                })
            })
            .collect()
    }

    /// The cursor to request the next page with, if any.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_ref()?.next.as_deref().filter(|c| !c.is_empty())
    }

    /// Total matches, 0 if not reported.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total_results.unwrap_or(0)
    }
}

/// Cursor block returned when `cursor=` pagination is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Cursor that produced this page.
    #[serde(rename = "@current", default)]
    pub current: Option<String>,

    /// Cursor for the following page.
    #[serde(rename = "@next", default)]
    pub next: Option<String>,
}

/// Accept a number, a numeric string, or null.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Same as [`lenient_u64`] but narrowed to `u32`.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_u64(deserializer)?.and_then(|n| u32::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Item {
        eid: String,
    }

    #[test]
    fn test_empty_result_set_placeholder_is_dropped() {
        let body = json!({
            "search-results": {
                "opensearch:totalResults": "0",
                "entry": [{"@_fa": "true", "error": "Result set was empty"}]
            }
        });

        let page: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.search_results.total(), 0);
        assert!(page.search_results.entries::<Item>().is_empty());
        assert!(page.search_results.next_cursor().is_none());
    }

    #[test]
    fn test_numeric_total_and_cursor() {
        let body = json!({
            "search-results": {
                "opensearch:totalResults": 3,
                "cursor": {"@current": "*", "@next": "AoE"},
                "entry": [{"eid": "2-s2.0-1"}, {"eid": "2-s2.0-2"}]
            }
        });

        let page: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.search_results.total(), 3);
        assert_eq!(page.search_results.next_cursor(), Some("AoE"));
        let entries: Vec<Item> = page.search_results.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].eid, "2-s2.0-2");
    }

    #[test]
    fn test_garbage_total_is_none() {
        let body = json!({"search-results": {"opensearch:totalResults": "many"}});
        let page: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.search_results.total_results, None);
    }

    #[test]
    fn test_malformed_entries_keep_their_slot() {
        let body = json!({
            "search-results": {
                "opensearch:totalResults": "3",
                "entry": [{"eid": "2-s2.0-1"}, {"eid": 42}, {"eid": "2-s2.0-3"}]
            }
        });

        let page: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.search_results.entries::<Item>().len(), 2);

        let kept: Vec<Item> = page.search_results.entries_or_default();
        let eids: Vec<&str> = kept.iter().map(|i| i.eid.as_str()).collect();
        assert_eq!(eids, vec!["2-s2.0-1", "", "2-s2.0-3"]);
    }

    #[test]
    fn test_all_malformed_page_is_not_empty() {
        let body = json!({
            "search-results": {
                "cursor": {"@next": "next"},
                "entry": [{"eid": 1}, {"eid": 2}]
            }
        });

        let page: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.search_results.entries_or_default::<Item>().len(), 2);
    }
}
