//! Renderer boundaries consumed by playback sessions.
//!
//! Implementations wrap whatever actually decodes and displays video: the
//! platform-native decoder for the primary path, and an embedded generic
//! media element for the fallback path. Sessions only command renderers
//! through these traits and observe the signals the host forwards back.

use async_trait::async_trait;

use super::PlaybackError;

/// Signals observable from the primary (native-decoder) renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimarySignal {
    /// The renderer began loading the URL
    LoadStart,
    /// The renderer finished loading and can play
    LoadSuccess,
    /// The renderer failed with a human-readable message
    LoadError(String),
}

/// Signals observable from the fallback renderer.
///
/// The fallback path is best-effort: it reports no structured errors, so
/// there is no error variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackSignal {
    /// The embedded document began loading
    LoadStart,
    /// The embedded document finished loading
    LoadEnd,
}

/// Primary renderer backend driven first for every session.
#[async_trait]
pub trait PrimaryRenderer: Send + Sync + std::fmt::Debug {
    /// Begin loading the URL. Load progress arrives later as
    /// [`PrimarySignal`]s forwarded by the host.
    ///
    /// # Errors
    /// - `PlaybackError::RendererStartFailed` - The backend rejected the URL
    ///   before any load was attempted
    async fn begin_load(&mut self, url: &str) -> Result<(), PlaybackError>;

    /// Release all resources held for the current URL.
    ///
    /// Called before the fallback renderer is constructed so no two
    /// renderers observe the same URL concurrently.
    async fn teardown(&mut self);
}

/// Fallback renderer backend engaged after a primary failure.
#[async_trait]
pub trait FallbackRenderer: Send + Sync + std::fmt::Debug {
    /// Begin loading the URL through the embedded media element.
    ///
    /// # Errors
    /// - `PlaybackError::RendererStartFailed` - The backend rejected the URL
    ///   before any load was attempted
    async fn begin_load(&mut self, url: &str) -> Result<(), PlaybackError>;

    /// Release all resources held for the current URL.
    async fn teardown(&mut self);
}
