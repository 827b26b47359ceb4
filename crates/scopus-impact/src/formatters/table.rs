//! Fixed-width console table.

use crate::impact::{ClassifiedDocument, ImpactReport};
use crate::models::CitationClass;

const COLUMN_WIDTH: usize = 14;
const RULE_WIDTH: usize = 70;

/// Format the full report: optional document listing, yearly table and summary.
#[must_use]
pub fn format_report(report: &ImpactReport, list_documents: bool) -> String {
    let mut output = String::new();

    if list_documents {
        for doc in &report.documents {
            output.push_str(&format_document_line(doc));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "-- Impact summary for {} from a total of {} articles:\n\n",
        report.author.display_name(),
        report.author.document_count
    ));

    output.push_str(&row([
        "year",
        CitationClass::SelfCitation.label(),
        CitationClass::KnownAuthor.label(),
        CitationClass::Fresh.label(),
        "cumulative",
    ]));

    for r in &report.years {
        output.push_str(&row([
            &r.year.to_string(),
            &r.counts.self_citations.to_string(),
            &r.counts.known_authors.to_string(),
            &r.counts.impact.to_string(),
            &r.cumulative.to_string(),
        ]));
    }

    output.push_str(&"_".repeat(RULE_WIDTH));
    output.push('\n');

    let totals = &report.totals;
    output.push_str(&row([
        "",
        &totals.self_citations.to_string(),
        &totals.known_authors.to_string(),
        &totals.impact.to_string(),
        &totals.impact.to_string(),
    ]));

    output.push_str(&format!("Period: {} years\n", report.period));
    output.push_str(&format!("Impact per year: {:.2}\n", report.impact_per_year));
    output.push_str(&format!("Impact:  {}\n", totals.impact));

    if report.skipped > 0 {
        output.push_str(&format!("Skipped: {} documents without authors or date\n", report.skipped));
    }

    output
}

/// One listing entry: the citing document and, if it was excluded, why.
#[must_use]
pub fn format_document_line(doc: &ClassifiedDocument) -> String {
    let mut line = format!(
        " {}. [{}] {}, {}, {} ({})\n",
        doc.index, doc.aggregation_type, doc.author_names, doc.title, doc.publication_name, doc.year
    );

    match doc.class {
        CitationClass::SelfCitation => {
            line.push_str(&format!(" - Self-citation found in author list '{}'\n", doc.author_names));
        }
        CitationClass::KnownAuthor => line.push_str(" - Reference citation found for author\n"),
        CitationClass::Fresh => {}
    }

    line
}

fn row(cells: [&str; 5]) -> String {
    let mut line: String = cells.iter().map(|c| format!("{c:<width$}", width = COLUMN_WIDTH)).collect();
    line.push('\n');
    line
}
