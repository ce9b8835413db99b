//! Freereel Core - Playback sessions and shared infrastructure
//!
//! This crate provides the building blocks shared by every Freereel
//! component: centralized configuration, tracing setup, and the adaptive
//! playback session that recovers from primary renderer failures by
//! switching to an embedded fallback player.

pub mod config;
pub mod playback;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::FreereelConfig;
pub use playback::{PlaybackError, PlaybackSession, PlaybackState};

/// Core errors that can bubble up from any Freereel subsystem.
#[derive(Debug, thiserror::Error)]
pub enum FreereelError {
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Resolution error: {reason}")]
    Resolution { reason: String },

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FreereelError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            FreereelError::Playback(e) => match e {
                PlaybackError::RendererStartFailed { url, .. } => {
                    format!("Could not start playback for {url}")
                }
                PlaybackError::FallbackExhausted { .. } => {
                    "Playback failed and no further fallback is available".to_string()
                }
            },
            FreereelError::Resolution { reason } => {
                format!("Stream resolution failed: {reason}")
            }
            FreereelError::Configuration { .. } => "Configuration error occurred".to_string(),
            FreereelError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Wrap a resolution-layer failure from a downstream crate.
    pub fn from_resolution_error(error: impl std::fmt::Display) -> Self {
        FreereelError::Resolution {
            reason: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FreereelError>;
