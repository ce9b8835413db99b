//! Error types for archive lookups.
//!
//! "No match found" is deliberately not an error: resolvers return `None`
//! for it so callers can render "not available" instead of a failure.

use thiserror::Error;

/// Errors that can occur talking to archive endpoints.
///
/// Both variants propagate immediately to the caller; there is no internal
/// retry or backoff anywhere in the resolution path.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Transport-level failure or non-success status from an endpoint.
    #[error("Archive unavailable at '{endpoint}': {reason}")]
    RemoteUnavailable {
        /// The endpoint that failed
        endpoint: String,
        /// The reason for the failure
        reason: String,
    },

    /// Payload could not be decoded into the expected shape.
    #[error("Malformed response from '{endpoint}': {reason}")]
    MalformedResponse {
        /// The endpoint whose payload failed to decode
        endpoint: String,
        /// The reason for the decode failure
        reason: String,
    },
}
