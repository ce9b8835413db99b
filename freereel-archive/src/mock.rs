//! Mock archive provider for testing.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::client::ArchiveProvider;
#[cfg(test)]
use crate::errors::ArchiveError;
#[cfg(test)]
use crate::types::{ArchiveItem, ArchiveManifest};

/// Provider serving canned items and manifests, recording every query.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MockArchiveProvider {
    items: Vec<ArchiveItem>,
    manifests: HashMap<String, ArchiveManifest>,
    fail_search: bool,
    queries: Arc<Mutex<Vec<String>>>,
}

#[cfg(test)]
impl MockArchiveProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_items(mut self, items: Vec<ArchiveItem>) -> Self {
        self.items = items;
        self
    }

    pub(crate) fn with_manifest(mut self, manifest: ArchiveManifest) -> Self {
        self.manifests.insert(manifest.identifier.clone(), manifest);
        self
    }

    /// Make every search fail with `RemoteUnavailable`.
    pub(crate) fn failing(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub(crate) fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Convenience item constructor for tests.
    pub(crate) fn item(identifier: &str, title: &str, year: Option<&str>) -> ArchiveItem {
        ArchiveItem {
            identifier: identifier.to_string(),
            title: title.to_string(),
            year: year.map(str::to_string),
            description: None,
            creator: None,
            mediatype: "movies".to_string(),
            downloads: None,
            item_size: None,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ArchiveProvider for MockArchiveProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ArchiveItem>, ArchiveError> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.fail_search {
            return Err(ArchiveError::RemoteUnavailable {
                endpoint: "advancedsearch".to_string(),
                reason: "mock outage".to_string(),
            });
        }

        Ok(self.items.iter().take(limit).cloned().collect())
    }

    async fn fetch_manifest(&self, identifier: &str) -> Result<ArchiveManifest, ArchiveError> {
        self.manifests
            .get(identifier)
            .cloned()
            .ok_or_else(|| ArchiveError::MalformedResponse {
                endpoint: "metadata".to_string(),
                reason: format!("no canned manifest for '{identifier}'"),
            })
    }
}
