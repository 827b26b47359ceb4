//! Aggregated impact report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{AuthorProfile, CitationClass};

/// Counters for one publication year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCounts {
    /// Self-citations.
    pub self_citations: u32,
    /// Citations whose first author was already counted.
    pub known_authors: u32,
    /// Fresh citing first authors.
    pub impact: u32,
}

impl YearCounts {
    /// Increment the counter for `class`.
    pub fn record(&mut self, class: CitationClass) {
        match class {
            CitationClass::SelfCitation => self.self_citations += 1,
            CitationClass::KnownAuthor => self.known_authors += 1,
            CitationClass::Fresh => self.impact += 1,
        }
    }

    /// Sum of all counters.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.self_citations + self.known_authors + self.impact
    }
}

/// One row of the yearly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRow {
    /// Publication year of the citing documents.
    pub year: i32,
    /// Counters for the year.
    #[serde(flatten)]
    pub counts: YearCounts,
    /// Impact accumulated up to and including this year.
    pub cumulative: u32,
}

/// Column totals.
pub type Totals = YearCounts;

/// A citing document after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDocument {
    /// 1-based position in retrieval order.
    pub index: usize,
    /// Cover-date year.
    pub year: i32,
    /// Classification.
    pub class: CitationClass,
    /// Source type.
    pub aggregation_type: String,
    /// Authors joined with `;`.
    pub author_names: String,
    /// Title.
    pub title: String,
    /// Source title.
    pub publication_name: String,
}

/// Impact of one researcher.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    /// The researcher.
    pub author: AuthorProfile,
    /// Rows in ascending year order.
    pub years: Vec<YearRow>,
    /// Column totals.
    pub totals: Totals,
    /// Distinct years with at least one classified document.
    pub period: usize,
    /// Total impact divided by the period, 0 when the period is empty.
    pub impact_per_year: f64,
    /// Documents dropped for missing authors or dates.
    pub skipped: usize,
    /// Classified documents in retrieval order.
    pub documents: Vec<ClassifiedDocument>,
}

impl ImpactReport {
    /// Build the report from per-year counters.
    #[must_use]
    pub fn from_years(
        author: AuthorProfile,
        years: BTreeMap<i32, YearCounts>,
        documents: Vec<ClassifiedDocument>,
        skipped: usize,
    ) -> Self {
        let mut totals = Totals::default();
        let rows: Vec<YearRow> = years
            .into_iter()
            .map(|(year, counts)| {
                totals.self_citations += counts.self_citations;
                totals.known_authors += counts.known_authors;
                totals.impact += counts.impact;
                YearRow { year, counts, cumulative: totals.impact }
            })
            .collect();

        let period = rows.len();
        let impact_per_year =
            if period == 0 { 0.0 } else { f64::from(totals.impact) / period as f64 };

        Self { author, years: rows, totals, period, impact_per_year, skipped, documents }
    }

    /// Total impact.
    #[must_use]
    pub const fn impact(&self) -> u32 {
        self.totals.impact
    }
}
