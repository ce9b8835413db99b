//! Stream resolution pipeline.
//!
//! Orchestrates match resolution, the manifest fetch, and file ranking into
//! a single call: catalog entry in, primary URL plus ordered quality
//! alternatives out. The pipeline is stateless and reentrant; concurrent
//! resolutions for distinct entries never contend. It performs at most one
//! search and one manifest fetch per invocation and never retries — callers
//! wanting a retry re-invoke.

use std::sync::Arc;

use tracing::info;

use freereel_core::config::ArchiveConfig;

use crate::client::{ArchiveOrgClient, ArchiveProvider};
use crate::errors::ArchiveError;
use crate::ranking;
use crate::resolver::MatchResolver;
use crate::types::{CatalogEntry, ResolvedStream};

/// Pipeline resolving catalog entries to playable archive streams.
#[derive(Debug)]
pub struct StreamPipeline {
    provider: Arc<dyn ArchiveProvider>,
    resolver: MatchResolver,
}

impl StreamPipeline {
    /// Creates a pipeline backed by the real archive endpoints.
    pub fn new(config: &ArchiveConfig) -> Self {
        let provider: Arc<dyn ArchiveProvider> = Arc::new(ArchiveOrgClient::with_config(config));
        Self::with_provider(provider, config.match_rows)
    }

    /// Creates a pipeline over an arbitrary provider.
    pub fn with_provider(provider: Arc<dyn ArchiveProvider>, match_rows: usize) -> Self {
        let resolver = MatchResolver::new(Arc::clone(&provider), match_rows);
        Self { provider, resolver }
    }

    /// Resolve a catalog entry to a primary URL and quality alternatives.
    ///
    /// A missing match yields [`ResolvedStream::unavailable`], the normal
    /// "not available for free streaming" outcome.
    ///
    /// # Errors
    /// - `ArchiveError::RemoteUnavailable` - Either endpoint failed at the transport level
    /// - `ArchiveError::MalformedResponse` - Either payload failed to decode
    pub async fn resolve(&self, entry: &CatalogEntry) -> Result<ResolvedStream, ArchiveError> {
        let year = entry.release_year();

        let Some(item) = self.resolver.find_match(&entry.title, year).await? else {
            info!(title = %entry.title, "no free stream available");
            return Ok(ResolvedStream::unavailable());
        };

        let manifest = self.provider.fetch_manifest(&item.identifier).await?;

        let stream = ResolvedStream {
            primary_url: ranking::select_primary(&manifest).map(|rendition| rendition.url),
            options: ranking::rank(&manifest),
        };

        info!(
            title = %entry.title,
            identifier = %item.identifier,
            available = stream.is_available(),
            options = stream.options.len(),
            "stream resolution completed"
        );

        Ok(stream)
    }
}
