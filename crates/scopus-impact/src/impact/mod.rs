//! Citation classification and yearly impact aggregation.
//!
//! Each citing document is classified against the researcher and a pool of
//! first authors already counted:
//!
//! 1. researcher in the author list → self-citation;
//! 2. first author already in the pool → known-author citation;
//! 3. otherwise the first author joins the pool and counts one unit of impact.
//!
//! Classification depends on retrieval order, since the pool grows as the pass
//! advances.

mod report;

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use crate::client::CitationSource;
use crate::error::{ImpactError, ImpactResult};
use crate::models::{AuthorProfile, CitationClass, CitingDocument};

pub use report::{ClassifiedDocument, ImpactReport, Totals, YearCounts, YearRow};

/// First authors already counted as fresh citing authors.
///
/// A pool can be reused across researchers so that an author citing several
/// of them is only counted once.
#[derive(Debug, Clone, Default)]
pub struct AuthorPool {
    seen: HashSet<u64>,
}

impl AuthorPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `author_id` has been counted.
    #[must_use]
    pub fn contains(&self, author_id: u64) -> bool {
        self.seen.contains(&author_id)
    }

    /// Add an author. Returns false if it was already present.
    pub fn insert(&mut self, author_id: u64) -> bool {
        self.seen.insert(author_id)
    }

    /// Number of authors in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Classify one citing document by its ordered author IDs.
///
/// The first element of `authors` is the first author. Returns `None` for an
/// empty list, which has no first author to classify. Only a fresh
/// classification mutates the pool.
pub fn classify(researcher: u64, authors: &[u64], pool: &mut AuthorPool) -> Option<CitationClass> {
    let (&first, _) = authors.split_first()?;

    if authors.contains(&researcher) {
        return Some(CitationClass::SelfCitation);
    }

    if pool.contains(first) {
        return Some(CitationClass::KnownAuthor);
    }

    pool.insert(first);
    Some(CitationClass::Fresh)
}

/// Classify and aggregate a researcher's citing documents.
///
/// Documents without a usable author list or cover date are skipped.
#[must_use]
pub fn analyze(
    profile: AuthorProfile,
    documents: &[CitingDocument],
    pool: &mut AuthorPool,
) -> ImpactReport {
    let mut years: BTreeMap<i32, YearCounts> = BTreeMap::new();
    let mut classified = Vec::with_capacity(documents.len());
    let mut skipped = 0usize;

    for (index, doc) in documents.iter().enumerate() {
        let index = index + 1;

        let Some(authors) = doc.author_ids() else {
            tracing::debug!(index, eid = ?doc.eid, "No author list, skipping");
            skipped += 1;
            continue;
        };

        let Some(year) = doc.year() else {
            tracing::warn!(index, eid = ?doc.eid, cover_date = ?doc.cover_date, "Unparseable cover date, skipping");
            skipped += 1;
            continue;
        };

        let Some(class) = classify(profile.id, &authors, pool) else {
            tracing::debug!(index, eid = ?doc.eid, "Empty author list, skipping");
            skipped += 1;
            continue;
        };
        years.entry(year).or_default().record(class);

        match class {
            CitationClass::SelfCitation => {
                tracing::debug!(index, year, "Self-citation");
            }
            CitationClass::KnownAuthor => {
                tracing::debug!(index, year, first_author = authors[0], "Known citing author");
            }
            CitationClass::Fresh => {
                tracing::debug!(index, year, first_author = authors[0], "Fresh citing author");
            }
        }

        classified.push(ClassifiedDocument {
            index,
            year,
            class,
            aggregation_type: doc.aggregation_type_or_default().to_string(),
            author_names: doc.author_names(),
            title: doc.title_or_default().to_string(),
            publication_name: doc.publication_name_or_default().to_string(),
        });
    }

    ImpactReport::from_years(profile, years, classified, skipped)
}

/// Fetch and analyze one researcher.
pub async fn run<S>(source: &S, author_id: u64, pool: &mut AuthorPool) -> ImpactResult<ImpactReport>
where
    S: CitationSource + ?Sized,
{
    if author_id == 0 {
        return Err(ImpactError::validation("author_id", "must be a positive Scopus author ID"));
    }

    let profile = source
        .author_profile(author_id)
        .await?
        .ok_or(ImpactError::AuthorNotFound { id: author_id })?;

    tracing::info!(author_id, name = %profile.display_name(), "Processing results");

    let start = Instant::now();
    let documents = source.citing_documents(author_id).await?;
    tracing::info!(
        author_id,
        documents = documents.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Retrieved citing data from server"
    );

    let report = analyze(profile, &documents, pool);
    tracing::info!(
        author_id,
        impact = report.totals.impact,
        self_citations = report.totals.self_citations,
        known_authors = report.totals.known_authors,
        skipped = report.skipped,
        "Impact computed"
    );

    Ok(report)
}
