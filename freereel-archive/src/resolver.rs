//! Best-effort matching of a catalog title to an archive item.
//!
//! Matching is heuristic by design: no confidence score is surfaced, and
//! when nothing satisfies the title/year conditions the most-downloaded
//! result is returned anyway. Downstream consumers must treat a returned
//! item as a candidate, not a verified identity.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::client::ArchiveProvider;
use crate::errors::ArchiveError;
use crate::types::ArchiveItem;

static TITLE_CLEANER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid title-cleaning pattern"));

/// Resolver that picks the single best candidate item for a title.
#[derive(Debug)]
pub struct MatchResolver {
    provider: Arc<dyn ArchiveProvider>,
    rows: usize,
}

impl MatchResolver {
    /// Creates a resolver over the given provider, requesting `rows`
    /// candidates per lookup.
    pub fn new(provider: Arc<dyn ArchiveProvider>, rows: usize) -> Self {
        Self { provider, rows }
    }

    /// Find the best candidate archive item for a title and optional year.
    ///
    /// `None` means the title is not findable, a normal outcome.
    ///
    /// # Errors
    /// - `ArchiveError::RemoteUnavailable` - Search transport failed
    /// - `ArchiveError::MalformedResponse` - Search payload failed to decode
    pub async fn find_match(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Option<ArchiveItem>, ArchiveError> {
        let clean_title = normalize_title(title);
        let query = match year {
            Some(year) => format!("{clean_title} {year}"),
            None => clean_title.clone(),
        };

        let candidates = self.provider.search(&query, self.rows).await?;
        let matched = select_match(candidates, &clean_title, year);

        debug!(
            title = %title,
            matched = matched.as_ref().map(|item| item.identifier.as_str()),
            "archive match resolution"
        );

        Ok(matched)
    }
}

/// Strip everything that is not a word character or whitespace, then trim.
pub fn normalize_title(title: &str) -> String {
    TITLE_CLEANER.replace_all(title, "").trim().to_string()
}

/// Selection rule over popularity-sorted candidates.
///
/// Prefer an item whose title contains the normalized title and whose year
/// equals the supplied year (when one was supplied); otherwise fall back to
/// the first, most-downloaded result.
fn select_match(
    candidates: Vec<ArchiveItem>,
    clean_title: &str,
    year: Option<&str>,
) -> Option<ArchiveItem> {
    if candidates.is_empty() {
        return None;
    }

    let wanted = clean_title.to_lowercase();
    let preferred = candidates.iter().position(|item| {
        let title_matches = item.title.to_lowercase().contains(&wanted);
        let year_matches = match year {
            Some(year) => item.year.as_deref() == Some(year),
            None => true,
        };
        title_matches && year_matches
    });

    match preferred {
        Some(index) => candidates.into_iter().nth(index),
        None => candidates.into_iter().next(),
    }
}
