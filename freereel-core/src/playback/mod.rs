//! Adaptive playback for resolved stream URLs.
//!
//! A [`PlaybackSession`] owns exactly one URL and drives a platform-native
//! primary renderer against it. When the primary renderer reports a load
//! error the session records the message and immediately hands the same URL
//! to an embedded fallback player, without any caller involvement. Callers
//! observe progress through [`PlaybackState`], the last error message, and
//! the fallback-active flag.

pub mod demo;
pub mod embed;
mod mock;
pub mod renderer;
pub mod session;

pub use demo::{DemoFallbackRenderer, DemoPrimaryRenderer};
pub use embed::embed_document;
pub use renderer::{FallbackRenderer, FallbackSignal, PrimaryRenderer, PrimarySignal};
pub use session::PlaybackSession;

use serde::Serialize;

/// Lifecycle states of a playback session.
///
/// A session starts in `Loading` and never returns to it; retrying a URL on
/// the primary renderer means constructing a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    /// Primary renderer is loading the URL
    Loading,
    /// Primary renderer loaded successfully and is playing
    Ready,
    /// Primary renderer failed; fallback is about to engage
    Error,
    /// Fallback renderer is loading the URL
    FallbackLoading,
    /// Fallback renderer finished loading; its own errors are out of scope
    FallbackReady,
}

impl PlaybackState {
    /// Whether the fallback renderer is the active one.
    pub fn is_fallback(self) -> bool {
        matches!(
            self,
            PlaybackState::FallbackLoading | PlaybackState::FallbackReady
        )
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Loading => write!(f, "loading"),
            PlaybackState::Ready => write!(f, "ready"),
            PlaybackState::Error => write!(f, "error"),
            PlaybackState::FallbackLoading => write!(f, "fallback-loading"),
            PlaybackState::FallbackReady => write!(f, "fallback-ready"),
        }
    }
}

/// Errors raised by playback sessions and renderers.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// A renderer could not begin loading the URL at all.
    #[error("Renderer failed to start loading '{url}': {reason}")]
    RendererStartFailed { url: String, reason: String },

    /// The single fallback attempt for this session was already consumed.
    #[error("Fallback already engaged for '{url}'")]
    FallbackExhausted { url: String },
}
