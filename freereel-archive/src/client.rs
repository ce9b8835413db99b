//! Internet Archive HTTP client.
//!
//! Two remote lookups, both side-effect-free with respect to local state:
//! a full-text search restricted to the movie media type, and a metadata
//! fetch for one item. No caching, no retry; a failed attempt propagates
//! immediately. Dropping the returned future abandons the transport call.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use freereel_core::config::ArchiveConfig;

use crate::errors::ArchiveError;
use crate::types::{ArchiveItem, ArchiveManifest};

/// Projection requested from the search endpoint.
const SEARCH_FIELDS: &str =
    "identifier,title,description,year,creator,mediatype,downloads,item_size";

/// Trait for archive lookups.
///
/// The seam between resolution logic and the real endpoints; tests swap in
/// canned providers here.
#[async_trait]
pub trait ArchiveProvider: Send + Sync + std::fmt::Debug {
    /// Full-text search restricted to movies, sorted by descending download
    /// count, capped at `limit` results. An empty query browses the whole
    /// movie collection.
    ///
    /// # Errors
    /// - `ArchiveError::RemoteUnavailable` - Transport failure or non-success status
    /// - `ArchiveError::MalformedResponse` - Payload failed to decode
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ArchiveItem>, ArchiveError>;

    /// Fetch metadata and file listing for one item.
    ///
    /// # Errors
    /// - `ArchiveError::RemoteUnavailable` - Transport failure or non-success status
    /// - `ArchiveError::MalformedResponse` - Payload failed to decode
    async fn fetch_manifest(&self, identifier: &str) -> Result<ArchiveManifest, ArchiveError>;
}

/// Client for the public archive.org endpoints.
#[derive(Debug)]
pub struct ArchiveOrgClient {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    user_agent: &'static str,
    featured_collections: Vec<&'static str>,
}

/// Envelope of the search endpoint: items live at `response.docs`.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<ArchiveItem>,
}

impl ArchiveOrgClient {
    /// Creates a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(&ArchiveConfig::default())
    }

    /// Creates a client from an archive configuration section.
    pub fn with_config(config: &ArchiveConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout,
            user_agent: config.user_agent,
            featured_collections: config.featured_collections.clone(),
        }
    }

    /// Featured movies from the curated collections, most downloaded first.
    ///
    /// # Errors
    /// - `ArchiveError::RemoteUnavailable` - Transport failure or non-success status
    /// - `ArchiveError::MalformedResponse` - Payload failed to decode
    pub async fn featured(&self, rows: usize) -> Result<Vec<ArchiveItem>, ArchiveError> {
        let query = featured_query(&self.featured_collections);
        self.run_search(&query, rows).await
    }

    async fn run_search(
        &self,
        search_query: &str,
        rows: usize,
    ) -> Result<Vec<ArchiveItem>, ArchiveError> {
        let url = format!("{}/advancedsearch.php", self.base_url);
        let rows = rows.to_string();
        let params = [
            ("q", search_query),
            ("fl[]", SEARCH_FIELDS),
            ("sort[]", "downloads desc"),
            ("rows", rows.as_str()),
            ("page", "1"),
            ("output", "json"),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .timeout(self.request_timeout)
            .header(reqwest::header::USER_AGENT, self.user_agent)
            .send()
            .await
            .map_err(|e| ArchiveError::RemoteUnavailable {
                endpoint: "advancedsearch".to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ArchiveError::RemoteUnavailable {
                endpoint: "advancedsearch".to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let envelope: SearchEnvelope =
            response
                .json()
                .await
                .map_err(|e| ArchiveError::MalformedResponse {
                    endpoint: "advancedsearch".to_string(),
                    reason: e.to_string(),
                })?;

        debug!(
            query = %search_query,
            results = envelope.response.docs.len(),
            "archive search completed"
        );

        Ok(envelope.response.docs)
    }
}

impl Default for ArchiveOrgClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveProvider for ArchiveOrgClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ArchiveItem>, ArchiveError> {
        self.run_search(&movie_query(query), limit).await
    }

    async fn fetch_manifest(&self, identifier: &str) -> Result<ArchiveManifest, ArchiveError> {
        let url = format!("{}/metadata/{}", self.base_url, identifier);

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .header(reqwest::header::USER_AGENT, self.user_agent)
            .send()
            .await
            .map_err(|e| ArchiveError::RemoteUnavailable {
                endpoint: "metadata".to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ArchiveError::RemoteUnavailable {
                endpoint: "metadata".to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let mut manifest: ArchiveManifest =
            response
                .json()
                .await
                .map_err(|e| ArchiveError::MalformedResponse {
                    endpoint: "metadata".to_string(),
                    reason: e.to_string(),
                })?;

        // The metadata endpoint reports a bare hostname; playable URLs need
        // a scheme on the front.
        if !manifest.server.is_empty() && !manifest.server.starts_with("http") {
            manifest.server = format!("https://{}", manifest.server);
        }

        debug!(
            identifier = %identifier,
            files = manifest.files.len(),
            "archive manifest fetched"
        );

        Ok(manifest)
    }
}

/// Search clause restricted to the movie media type.
fn movie_query(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        "mediatype:movies".to_string()
    } else {
        format!("{query} AND mediatype:movies")
    }
}

/// OR-joined curated-collection clause for the featured listing.
fn featured_query(collections: &[&str]) -> String {
    let clauses: Vec<String> = collections
        .iter()
        .map(|c| format!("collection:{c}"))
        .collect();
    format!("({}) AND mediatype:movies", clauses.join(" OR "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_query_restricts_media_type() {
        assert_eq!(
            movie_query("night of the living dead 1968"),
            "night of the living dead 1968 AND mediatype:movies"
        );
    }

    #[test]
    fn test_empty_query_browses_all_movies() {
        assert_eq!(movie_query(""), "mediatype:movies");
        assert_eq!(movie_query("   "), "mediatype:movies");
    }

    #[test]
    fn test_featured_query_joins_collections() {
        let query = featured_query(&["prelinger", "feature_films"]);
        assert_eq!(
            query,
            "(collection:prelinger OR collection:feature_films) AND mediatype:movies"
        );
    }

    #[test]
    fn test_client_from_config_strips_trailing_slash() {
        let mut config = ArchiveConfig::default();
        config.base_url = "https://mirror.example/".to_string();
        let client = ArchiveOrgClient::with_config(&config);
        assert_eq!(client.base_url, "https://mirror.example");
    }

    #[test]
    fn test_search_envelope_decodes_docs() {
        let envelope: SearchEnvelope = serde_json::from_str(
            r#"{
                "responseHeader": {"status": 0},
                "response": {
                    "numFound": 1,
                    "docs": [
                        {
                            "identifier": "night_of_the_living_dead_1968",
                            "title": "Night of the Living Dead",
                            "year": "1968",
                            "mediatype": "movies",
                            "downloads": 900
                        }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(envelope.response.docs.len(), 1);
        assert_eq!(
            envelope.response.docs[0].identifier,
            "night_of_the_living_dead_1968"
        );
    }
}
