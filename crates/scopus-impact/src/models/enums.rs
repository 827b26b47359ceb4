//! Enumerations shared across the crate.

use serde::{Deserialize, Serialize};

/// How a citing document counts towards a researcher's impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationClass {
    /// The researcher is among the citing document's authors.
    SelfCitation,
    /// The first author was already counted earlier in the pass.
    KnownAuthor,
    /// A first author not seen before; counts one unit of impact.
    Fresh,
}

impl CitationClass {
    /// Column label used in the console table.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfCitation => "selfies",
            Self::KnownAuthor => "excl-refs",
            Self::Fresh => "impact",
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width console table.
    #[default]
    Table,
    /// JSON document.
    Json,
}
