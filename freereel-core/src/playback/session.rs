//! Playback session state machine.
//!
//! One session per active playback: the session is constructed for a URL,
//! drives the primary renderer, and is discarded and replaced when the
//! caller wants a different URL or a retry. Replacing instead of mutating
//! keeps overlapping renderer callbacks from racing each other.

use tracing::{debug, info, warn};

use super::renderer::{FallbackRenderer, FallbackSignal, PrimaryRenderer, PrimarySignal};
use super::{PlaybackError, PlaybackState};

/// State machine wrapping one URL and two renderer backends.
///
/// Only one renderer is hot at a time. The primary renderer is torn down
/// before the fallback begins loading, and primary signals arriving after
/// the switch are ignored.
#[derive(Debug)]
pub struct PlaybackSession {
    url: String,
    state: PlaybackState,
    last_error: Option<String>,
    fallback_attempted: bool,
    primary: Box<dyn PrimaryRenderer>,
    fallback: Box<dyn FallbackRenderer>,
}

impl PlaybackSession {
    /// Create a session and start the primary renderer against the URL.
    ///
    /// The session begins in [`PlaybackState::Loading`].
    ///
    /// # Errors
    /// - `PlaybackError::RendererStartFailed` - The primary renderer
    ///   rejected the URL outright
    pub async fn start(
        url: impl Into<String>,
        mut primary: Box<dyn PrimaryRenderer>,
        fallback: Box<dyn FallbackRenderer>,
    ) -> Result<Self, PlaybackError> {
        let url = url.into();
        info!(url = %url, "starting playback session");
        primary.begin_load(&url).await?;

        Ok(Self {
            url,
            state: PlaybackState::Loading,
            last_error: None,
            fallback_attempted: false,
            primary,
            fallback,
        })
    }

    /// Current state of the session.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// URL this session was created for.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Last error message received from the primary renderer, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the fallback renderer is currently the active one.
    pub fn fallback_active(&self) -> bool {
        self.state.is_fallback()
    }

    /// Feed a signal observed from the primary renderer.
    ///
    /// A load error records the message, transitions through
    /// [`PlaybackState::Error`], and immediately engages the fallback
    /// renderer. Signals arriving after the fallback is active are dropped.
    ///
    /// # Errors
    /// - `PlaybackError::RendererStartFailed` - The fallback renderer
    ///   rejected the URL while recovering from a primary failure
    pub async fn on_primary_signal(&mut self, signal: PrimarySignal) -> Result<(), PlaybackError> {
        if self.fallback_active() {
            debug!(url = %self.url, ?signal, "ignoring primary signal after fallback switch");
            return Ok(());
        }

        match signal {
            PrimarySignal::LoadStart => {
                debug!(url = %self.url, "primary renderer load started");
            }
            PrimarySignal::LoadSuccess => {
                if self.state == PlaybackState::Loading {
                    self.set_state(PlaybackState::Ready);
                }
            }
            PrimarySignal::LoadError(message) => {
                warn!(url = %self.url, error = %message, "primary renderer failed");
                self.last_error = Some(message);
                self.set_state(PlaybackState::Error);
                self.engage_fallback().await?;
            }
        }

        Ok(())
    }

    /// Feed a signal observed from the fallback renderer.
    pub fn on_fallback_signal(&mut self, signal: FallbackSignal) {
        if !self.fallback_active() {
            debug!(url = %self.url, ?signal, "ignoring fallback signal while primary is active");
            return;
        }

        match signal {
            FallbackSignal::LoadStart => {
                debug!(url = %self.url, "fallback renderer load started");
            }
            FallbackSignal::LoadEnd => {
                self.set_state(PlaybackState::FallbackReady);
            }
        }
    }

    /// Switch to the fallback renderer on explicit user request.
    ///
    /// Reachable from `Loading` and `Ready` without waiting for a failure.
    ///
    /// # Errors
    /// - `PlaybackError::FallbackExhausted` - The fallback was already engaged
    /// - `PlaybackError::RendererStartFailed` - The fallback renderer
    ///   rejected the URL
    pub async fn use_fallback(&mut self) -> Result<(), PlaybackError> {
        if self.fallback_attempted {
            return Err(PlaybackError::FallbackExhausted {
                url: self.url.clone(),
            });
        }

        info!(url = %self.url, "fallback requested by caller");
        self.engage_fallback().await
    }

    /// Tear down the primary renderer and start the fallback.
    ///
    /// Attempted at most once per session. The primary teardown completes
    /// before the fallback load begins, so the two renderers never observe
    /// the URL concurrently.
    async fn engage_fallback(&mut self) -> Result<(), PlaybackError> {
        if self.fallback_attempted {
            debug!(url = %self.url, "fallback already attempted for this session");
            return Ok(());
        }
        self.fallback_attempted = true;

        self.primary.teardown().await;
        self.set_state(PlaybackState::FallbackLoading);
        self.fallback.begin_load(&self.url).await
    }

    fn set_state(&mut self, next: PlaybackState) {
        debug!(url = %self.url, from = %self.state, to = %next, "playback state transition");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::{MockFallbackRenderer, MockPrimaryRenderer, RendererLog};
    use super::*;

    async fn session_with_log(log: &RendererLog) -> PlaybackSession {
        PlaybackSession::start(
            "https://example.org/items/movie/movie.mp4",
            Box::new(MockPrimaryRenderer::new(log)),
            Box::new(MockFallbackRenderer::new(log)),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_session_starts_loading_on_primary() {
        let log = RendererLog::default();
        let session = session_with_log(&log).await;

        assert_eq!(session.state(), PlaybackState::Loading);
        assert!(!session.fallback_active());
        assert_eq!(
            log.entries(),
            vec!["primary.load https://example.org/items/movie/movie.mp4"]
        );
    }

    #[tokio::test]
    async fn test_load_success_reaches_ready_without_fallback() {
        let log = RendererLog::default();
        let mut session = session_with_log(&log).await;

        session
            .on_primary_signal(PrimarySignal::LoadStart)
            .await
            .unwrap();
        session
            .on_primary_signal(PrimarySignal::LoadSuccess)
            .await
            .unwrap();

        assert_eq!(session.state(), PlaybackState::Ready);
        assert!(!session.fallback_active());
        assert!(session.last_error().is_none());
        // No fallback activity was logged
        assert!(log.entries().iter().all(|e| e.starts_with("primary.")));
    }

    #[tokio::test]
    async fn test_load_error_engages_fallback_automatically() {
        let log = RendererLog::default();
        let mut session = session_with_log(&log).await;

        session
            .on_primary_signal(PrimarySignal::LoadError("unsupported codec".to_string()))
            .await
            .unwrap();

        assert_eq!(session.state(), PlaybackState::FallbackLoading);
        assert!(session.fallback_active());
        assert_eq!(session.last_error(), Some("unsupported codec"));
        // Primary torn down before fallback load began
        assert_eq!(
            log.entries(),
            vec![
                "primary.load https://example.org/items/movie/movie.mp4",
                "primary.teardown",
                "fallback.load https://example.org/items/movie/movie.mp4",
            ]
        );
    }

    #[tokio::test]
    async fn test_error_from_ready_state_engages_fallback() {
        let log = RendererLog::default();
        let mut session = session_with_log(&log).await;

        session
            .on_primary_signal(PrimarySignal::LoadSuccess)
            .await
            .unwrap();
        assert_eq!(session.state(), PlaybackState::Ready);

        session
            .on_primary_signal(PrimarySignal::LoadError("network stall".to_string()))
            .await
            .unwrap();

        assert_eq!(session.state(), PlaybackState::FallbackLoading);
        assert_eq!(session.last_error(), Some("network stall"));
    }

    #[tokio::test]
    async fn test_fallback_load_end_reaches_fallback_ready() {
        let log = RendererLog::default();
        let mut session = session_with_log(&log).await;

        session
            .on_primary_signal(PrimarySignal::LoadError("decode failure".to_string()))
            .await
            .unwrap();
        session.on_fallback_signal(FallbackSignal::LoadStart);
        assert_eq!(session.state(), PlaybackState::FallbackLoading);

        session.on_fallback_signal(FallbackSignal::LoadEnd);
        assert_eq!(session.state(), PlaybackState::FallbackReady);
        assert!(session.fallback_active());
    }

    #[tokio::test]
    async fn test_manual_override_from_loading() {
        let log = RendererLog::default();
        let mut session = session_with_log(&log).await;

        session.use_fallback().await.unwrap();

        assert_eq!(session.state(), PlaybackState::FallbackLoading);
        assert!(session.fallback_active());
        // No error was involved in a manual switch
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_manual_override_twice_is_exhausted() {
        let log = RendererLog::default();
        let mut session = session_with_log(&log).await;

        session.use_fallback().await.unwrap();
        let result = session.use_fallback().await;

        assert!(matches!(
            result,
            Err(PlaybackError::FallbackExhausted { .. })
        ));
    }

    #[tokio::test]
    async fn test_primary_signals_ignored_after_fallback() {
        let log = RendererLog::default();
        let mut session = session_with_log(&log).await;

        session
            .on_primary_signal(PrimarySignal::LoadError("failed".to_string()))
            .await
            .unwrap();
        let before = log.entries().len();

        // A straggling success from the torn-down primary must not move state
        session
            .on_primary_signal(PrimarySignal::LoadSuccess)
            .await
            .unwrap();

        assert_eq!(session.state(), PlaybackState::FallbackLoading);
        assert_eq!(log.entries().len(), before);
    }

    #[tokio::test]
    async fn test_fallback_signals_ignored_while_primary_active() {
        let log = RendererLog::default();
        let mut session = session_with_log(&log).await;

        session.on_fallback_signal(FallbackSignal::LoadEnd);
        assert_eq!(session.state(), PlaybackState::Loading);
    }

    #[tokio::test]
    async fn test_failing_fallback_renderer_propagates() {
        let log = RendererLog::default();
        let mut session = PlaybackSession::start(
            "https://example.org/items/movie/movie.mp4",
            Box::new(MockPrimaryRenderer::new(&log)),
            Box::new(MockFallbackRenderer::rejecting(&log)),
        )
        .await
        .unwrap();

        let result = session
            .on_primary_signal(PrimarySignal::LoadError("failed".to_string()))
            .await;

        assert!(matches!(
            result,
            Err(PlaybackError::RendererStartFailed { .. })
        ));
        assert_eq!(session.last_error(), Some("failed"));
    }
}
