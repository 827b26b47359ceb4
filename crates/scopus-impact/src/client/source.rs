//! The seam between data retrieval and the impact analysis.

use futures::TryStreamExt;

use super::ScopusClient;
use crate::error::ClientResult;
use crate::models::{AuthorProfile, CitingDocument};

/// Anything that can name a researcher and list the documents citing them.
#[async_trait::async_trait]
pub trait CitationSource: Send + Sync {
    /// Profile of the researcher, `None` if the ID is unknown.
    async fn author_profile(&self, author_id: u64) -> ClientResult<Option<AuthorProfile>>;

    /// All documents citing the researcher, in retrieval order.
    async fn citing_documents(&self, author_id: u64) -> ClientResult<Vec<CitingDocument>>;
}

#[async_trait::async_trait]
impl CitationSource for ScopusClient {
    async fn author_profile(&self, author_id: u64) -> ClientResult<Option<AuthorProfile>> {
        self.search_author(author_id).await
    }

    async fn citing_documents(&self, author_id: u64) -> ClientResult<Vec<CitingDocument>> {
        self.citing_documents_stream(author_id).try_collect().await
    }
}
