//! Centralized configuration for Freereel.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use crate::FreereelError;

/// Central configuration for all Freereel components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct FreereelConfig {
    pub archive: ArchiveConfig,
    pub playback: PlaybackConfig,
}

/// Internet Archive endpoint configuration.
///
/// Controls base URL, HTTP timeouts, and how many rows the different
/// search-style lookups request.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Base URL of the archive API (no trailing slash)
    pub base_url: String,
    /// HTTP request timeout for search and metadata lookups
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
    /// Row cap for open-ended browse searches
    pub search_rows: usize,
    /// Row cap when matching a single catalog title
    pub match_rows: usize,
    /// Curated collections queried for the featured listing
    pub featured_collections: Vec<&'static str>,
    /// Row cap for the featured listing
    pub featured_rows: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: "https://archive.org".to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: "freereel/0.1.0",
            search_rows: 50,
            match_rows: 10,
            featured_collections: vec![
                "prelinger",
                "moviesandfilms",
                "feature_films",
                "silentfilms",
            ],
            featured_rows: 20,
        }
    }
}

/// Playback presentation configuration.
///
/// Controls how the fallback embed document is rendered. The primary
/// renderer is platform-native and takes no parameters from here.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Background color of the fallback embed document
    pub embed_background: &'static str,
    /// Preload policy for the embedded video element
    pub embed_preload: &'static str,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            embed_background: "#000",
            embed_preload: "metadata",
        }
    }
}

impl FreereelConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    ///
    /// # Errors
    /// - `FreereelError::Configuration` - A set override does not parse as
    ///   the expected numeric type
    pub fn from_env() -> Result<Self, FreereelError> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("FREEREEL_ARCHIVE_BASE_URL") {
            config.archive.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(timeout) = std::env::var("FREEREEL_REQUEST_TIMEOUT") {
            let seconds = parse_env("FREEREEL_REQUEST_TIMEOUT", &timeout)?;
            config.archive.request_timeout = Duration::from_secs(seconds);
        }

        if let Ok(rows) = std::env::var("FREEREEL_SEARCH_ROWS") {
            config.archive.search_rows = parse_env("FREEREEL_SEARCH_ROWS", &rows)?;
        }

        if let Ok(rows) = std::env::var("FREEREEL_MATCH_ROWS") {
            config.archive.match_rows = parse_env("FREEREEL_MATCH_ROWS", &rows)?;
        }

        Ok(config)
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Uses a short timeout so failing transports surface quickly.
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config.archive.request_timeout = Duration::from_secs(2);
        config
    }
}

/// Parse a numeric environment override, naming the variable on failure.
fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, FreereelError> {
    value.parse().map_err(|_| FreereelError::Configuration {
        reason: format!("{name} must be a number, got '{value}'"),
    })
}
