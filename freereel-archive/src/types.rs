//! Data types for archive matching and stream resolution.

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog entry supplied by the commercial-metadata caller.
///
/// Immutable input to resolution; the release date is free text in whatever
/// shape the catalog provider uses (`"1968-10-01"`, `"1968"`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display title of the movie
    pub title: String,
    /// Release date text, when the catalog knows it
    pub release_date: Option<String>,
}

impl CatalogEntry {
    /// Creates a catalog entry from title and optional release-date text.
    pub fn new(title: impl Into<String>, release_date: Option<String>) -> Self {
        Self {
            title: title.into(),
            release_date,
        }
    }

    /// Year portion of the release date: the text before the first
    /// `-`, `/` or `.` separator. `None` when absent or empty.
    pub fn release_year(&self) -> Option<&str> {
        let date = self.release_date.as_deref()?;
        let year = date.split(['-', '/', '.']).next().unwrap_or("").trim();
        if year.is_empty() { None } else { Some(year) }
    }
}

/// One entry in the archive's catalog, produced by search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveItem {
    /// Unique key in the archive namespace
    pub identifier: String,
    /// Item title as the archive records it
    #[serde(default)]
    pub title: String,
    /// Release year, when known
    #[serde(default, deserialize_with = "de_loose_string")]
    pub year: Option<String>,
    /// Free-text description
    #[serde(default, deserialize_with = "de_loose_string")]
    pub description: Option<String>,
    /// Uploader or original creator
    #[serde(default, deserialize_with = "de_loose_string")]
    pub creator: Option<String>,
    /// Archive media type (search is restricted to `movies`)
    #[serde(default)]
    pub mediatype: String,
    /// All-time download count, the search sort key
    #[serde(default)]
    pub downloads: Option<u64>,
    /// Total size of the item in bytes, when the search reports it
    #[serde(default)]
    pub item_size: Option<u64>,
}

impl ArchiveItem {
    /// Human-readable total item size, when the search reported one.
    pub fn size_label(&self) -> Option<String> {
        self.item_size.map(format_size)
    }
}

/// One file within an archive item's manifest.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveFile {
    /// Filename within the item directory
    pub name: String,
    /// Encoding/container tag, e.g. "MPEG4" or "OGG Video"; often missing
    #[serde(default)]
    pub format: String,
    /// File size; the archive serves this as either a string or a number
    #[serde(default, deserialize_with = "de_loose_string")]
    pub size: Option<String>,
}

impl ArchiveFile {
    /// Size in bytes when the size field parses as an integer.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(|s| s.trim().parse().ok())
    }

    /// Human-readable size label, falling back to the raw field.
    pub fn size_label(&self) -> String {
        match self.size_bytes() {
            Some(bytes) => format_size(bytes),
            None => self.size.clone().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Descriptive metadata block of a manifest.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ItemMetadata {
    /// Item title
    #[serde(default)]
    pub title: String,
    /// Free-text description
    #[serde(default, deserialize_with = "de_loose_string")]
    pub description: Option<String>,
    /// Publication date text
    #[serde(default, deserialize_with = "de_loose_string")]
    pub date: Option<String>,
    /// Uploader or original creator
    #[serde(default, deserialize_with = "de_loose_string")]
    pub creator: Option<String>,
}

/// File listing plus hosting location for one archive item.
///
/// Fetched fresh for every resolution; there is no shared manifest cache.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveManifest {
    /// Unique key in the archive namespace
    #[serde(default)]
    pub identifier: String,
    /// Descriptive metadata block
    #[serde(default)]
    pub metadata: ItemMetadata,
    /// All files belonging to this item
    #[serde(default)]
    pub files: Vec<ArchiveFile>,
    /// Hosting server, normalized to carry a scheme by the client
    #[serde(default)]
    pub server: String,
    /// Item directory on the hosting server (leading slash included)
    #[serde(default)]
    pub dir: String,
}

impl ArchiveManifest {
    /// The playable URL for a file: exactly `server + dir + "/" + name`.
    ///
    /// This join is the only way a playable URL is ever constructed.
    pub fn file_url(&self, file: &ArchiveFile) -> String {
        format!("{}{}/{}", self.server, self.dir, file.name)
    }
}

/// Quality label assigned to a rendition.
///
/// Derived from filename first, then format, so an explicit resolution in
/// the name always wins over a generic format-based guess. Variants are
/// ordered best quality first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum QualityLabel {
    /// Filename advertises 1080p or HD
    #[serde(rename = "1080p")]
    P1080,
    /// Filename advertises 720p
    #[serde(rename = "720p")]
    P720,
    /// Filename advertises 480p
    #[serde(rename = "480p")]
    P480,
    /// MPEG4/h.264 format with no resolution in the name
    High,
    /// OGG format with no resolution in the name
    Medium,
    /// Everything else
    Standard,
}

impl std::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityLabel::P1080 => write!(f, "1080p"),
            QualityLabel::P720 => write!(f, "720p"),
            QualityLabel::P480 => write!(f, "480p"),
            QualityLabel::High => write!(f, "High"),
            QualityLabel::Medium => write!(f, "Medium"),
            QualityLabel::Standard => write!(f, "Standard"),
        }
    }
}

/// One playable encoded file discovered in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenditionOption {
    /// Playable URL
    pub url: String,
    /// Filename the rendition came from
    pub name: String,
    /// Encoding/container tag as the manifest recorded it
    pub format: String,
    /// Human-readable size
    pub size_label: String,
    /// Assigned quality label
    pub quality: QualityLabel,
}

/// Result of resolving a catalog entry against the archive.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedStream {
    /// Best-guess playable URL; `None` when the title is not freely
    /// streamable, which is a normal outcome rather than an error
    pub primary_url: Option<String>,
    /// Every qualifying rendition in manifest order
    pub options: Vec<RenditionOption>,
}

impl ResolvedStream {
    /// The "not available for free streaming" result.
    pub fn unavailable() -> Self {
        Self {
            primary_url: None,
            options: Vec::new(),
        }
    }

    /// Whether any playable rendition was found.
    pub fn is_available(&self) -> bool {
        self.primary_url.is_some()
    }
}

/// Format a byte count in human-readable form.
pub(crate) fn format_size(bytes: u64) -> String {
    const GB: u64 = 1024 * 1024 * 1024;
    const MB: u64 = 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

/// Accept a string, number, or list-of-strings field as an optional string.
///
/// The archive's JSON is loosely typed: years arrive as numbers, sizes as
/// strings or numbers, and descriptive fields occasionally as lists. Lists
/// collapse to their first value.
fn de_loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Integer(i64),
        Float(f64),
        List(Vec<String>),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => None,
        Some(Loose::Text(s)) => Some(s),
        Some(Loose::Integer(n)) => Some(n.to_string()),
        Some(Loose::Float(n)) => Some(n.to_string()),
        Some(Loose::List(values)) => values.into_iter().next(),
    })
}
