//! Demo renderer backends.
//!
//! Stand-ins for the platform decoder and the embedded web player, used by
//! the CLI to walk a session through its transitions without a display.
//! They log what a real backend would do and otherwise accept every URL.

use async_trait::async_trait;
use tracing::info;

use super::PlaybackError;
use super::embed::embed_document;
use super::renderer::{FallbackRenderer, PrimaryRenderer};
use crate::config::PlaybackConfig;

/// Primary renderer stand-in that accepts every URL.
#[derive(Debug, Default)]
pub struct DemoPrimaryRenderer {
    current_url: Option<String>,
}

impl DemoPrimaryRenderer {
    /// Creates a demo primary renderer.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrimaryRenderer for DemoPrimaryRenderer {
    async fn begin_load(&mut self, url: &str) -> Result<(), PlaybackError> {
        info!(url = %url, "demo primary renderer loading");
        self.current_url = Some(url.to_string());
        Ok(())
    }

    async fn teardown(&mut self) {
        if let Some(url) = self.current_url.take() {
            info!(url = %url, "demo primary renderer torn down");
        }
    }
}

/// Fallback renderer stand-in that builds the real embed document.
#[derive(Debug)]
pub struct DemoFallbackRenderer {
    config: PlaybackConfig,
    current_url: Option<String>,
}

impl DemoFallbackRenderer {
    /// Creates a demo fallback renderer with the given embed settings.
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            current_url: None,
        }
    }
}

#[async_trait]
impl FallbackRenderer for DemoFallbackRenderer {
    async fn begin_load(&mut self, url: &str) -> Result<(), PlaybackError> {
        let document = embed_document(url, &self.config);
        info!(
            url = %url,
            document_bytes = document.len(),
            "demo fallback renderer loading embed document"
        );
        self.current_url = Some(url.to_string());
        Ok(())
    }

    async fn teardown(&mut self) {
        if let Some(url) = self.current_url.take() {
            info!(url = %url, "demo fallback renderer torn down");
        }
    }
}
