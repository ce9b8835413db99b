//! Freereel Archive - Free-stream matching and resolution

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Matches commercial catalog entries against the Internet Archive's public
//! movie collection, ranks the encoded files of a matched item into playable
//! renditions, and resolves a catalog entry into a primary URL plus ordered
//! quality alternatives.

pub mod client;
pub mod errors;
mod mock;
pub mod pipeline;
pub mod ranking;
pub mod resolver;
pub mod types;

// Re-export main types
pub use client::{ArchiveOrgClient, ArchiveProvider};
pub use errors::ArchiveError;
pub use pipeline::StreamPipeline;
pub use resolver::MatchResolver;
pub use types::{
    ArchiveFile, ArchiveItem, ArchiveManifest, CatalogEntry, QualityLabel, RenditionOption,
    ResolvedStream,
};

/// Convenience type alias for Results with ArchiveError.
pub type Result<T> = std::result::Result<T, ArchiveError>;
