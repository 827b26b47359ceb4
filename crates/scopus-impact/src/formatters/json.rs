//! JSON output formatting.

use serde_json::{Value, json};

use crate::error::ImpactResult;
use crate::impact::ImpactReport;

/// Serialize a report, optionally without the per-document listing.
pub fn report_json(report: &ImpactReport, include_documents: bool) -> ImpactResult<String> {
    Ok(serde_json::to_string_pretty(&report_value(report, include_documents)?)?)
}

/// Serialize several reports as one JSON array.
pub fn reports_json(reports: &[ImpactReport], include_documents: bool) -> ImpactResult<String> {
    let values = reports
        .iter()
        .map(|r| report_value(r, include_documents))
        .collect::<ImpactResult<Vec<Value>>>()?;
    Ok(serde_json::to_string_pretty(&values)?)
}

fn report_value(report: &ImpactReport, include_documents: bool) -> ImpactResult<Value> {
    let mut value = serde_json::to_value(report)?;

    if !include_documents {
        if let Some(obj) = value.as_object_mut() {
            obj.remove("documents");
        }
    }

    value["impactPerYear"] = json!((report.impact_per_year * 100.0).round() / 100.0);

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::impact::YearCounts;
    use crate::models::AuthorProfile;

    #[test]
    fn test_report_json_drops_documents() {
        let mut years = BTreeMap::new();
        years.insert(2022, YearCounts { self_citations: 1, known_authors: 0, impact: 2 });
        let profile = AuthorProfile {
            id: 5,
            surname: "Lovelace".into(),
            given_name: "Ada".into(),
            document_count: 9,
        };
        let report = ImpactReport::from_years(profile, years, vec![], 0);

        let out: Value = serde_json::from_str(&report_json(&report, false).unwrap()).unwrap();
        assert!(out.get("documents").is_none());
        assert_eq!(out["author"]["surname"], "Lovelace");
        assert_eq!(out["years"][0]["year"], 2022);
        assert_eq!(out["years"][0]["impact"], 2);
        assert_eq!(out["years"][0]["cumulative"], 2);
        assert_eq!(out["totals"]["selfCitations"], 1);
        assert_eq!(out["impactPerYear"], 2.0);

        let many: Value =
            serde_json::from_str(&reports_json(&[report.clone(), report], true).unwrap()).unwrap();
        assert_eq!(many.as_array().map(Vec::len), Some(2));
        assert!(many[0]["documents"].is_array());
    }
}
