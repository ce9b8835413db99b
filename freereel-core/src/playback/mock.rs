//! Mock renderer implementations for testing.

#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use super::PlaybackError;
#[cfg(test)]
use super::renderer::{FallbackRenderer, PrimaryRenderer};

/// Shared, ordered record of renderer calls across a session's backends.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RendererLog {
    entries: Arc<Mutex<Vec<String>>>,
}

#[cfg(test)]
impl RendererLog {
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

/// Primary renderer that records calls and accepts every URL.
#[cfg(test)]
#[derive(Debug)]
pub struct MockPrimaryRenderer {
    log: RendererLog,
}

#[cfg(test)]
impl MockPrimaryRenderer {
    pub fn new(log: &RendererLog) -> Self {
        Self { log: log.clone() }
    }
}

#[cfg(test)]
#[async_trait]
impl PrimaryRenderer for MockPrimaryRenderer {
    async fn begin_load(&mut self, url: &str) -> Result<(), PlaybackError> {
        self.log.record(format!("primary.load {url}"));
        Ok(())
    }

    async fn teardown(&mut self) {
        self.log.record("primary.teardown");
    }
}

/// Fallback renderer that records calls; optionally rejects every load.
#[cfg(test)]
#[derive(Debug)]
pub struct MockFallbackRenderer {
    log: RendererLog,
    reject: bool,
}

#[cfg(test)]
impl MockFallbackRenderer {
    pub fn new(log: &RendererLog) -> Self {
        Self {
            log: log.clone(),
            reject: false,
        }
    }

    /// Build a fallback renderer whose `begin_load` always fails.
    pub fn rejecting(log: &RendererLog) -> Self {
        Self {
            log: log.clone(),
            reject: true,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl FallbackRenderer for MockFallbackRenderer {
    async fn begin_load(&mut self, url: &str) -> Result<(), PlaybackError> {
        if self.reject {
            self.log.record(format!("fallback.reject {url}"));
            return Err(PlaybackError::RendererStartFailed {
                url: url.to_string(),
                reason: "mock rejection".to_string(),
            });
        }
        self.log.record(format!("fallback.load {url}"));
        Ok(())
    }

    async fn teardown(&mut self) {
        self.log.record("fallback.teardown");
    }
}
