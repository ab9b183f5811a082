//! Render engine - wires transport, detector and render controller.

use std::sync::Arc;

use common::{DetectError, Diagnostics};
use media_detect::{Element, MediaDetector, MediaRenderer, RenderPhase, RenderProps};
use networking::{ClientError, HttpClient, Transport};

use crate::config::RendererConfig;

/// Settled result of rendering one url.
#[derive(Clone, Debug)]
pub struct RenderReport {
    pub phase: RenderPhase,
    pub element: Option<Element>,
    pub error: Option<DetectError>,
}

impl RenderReport {
    /// Whether a media element was produced.
    pub fn is_rendered(&self) -> bool {
        self.element.is_some()
    }
}

/// The render engine.
pub struct RenderEngine {
    /// Engine configuration.
    config: RendererConfig,
    /// Shared dispatcher.
    detector: Arc<MediaDetector>,
}

impl RenderEngine {
    /// Create an engine backed by a real HTTP client.
    pub fn new(config: RendererConfig) -> Result<Self, ClientError> {
        let client = HttpClient::with_config(config.client_config())?;
        Ok(Self::with_transport(config, Arc::new(client)))
    }

    /// Create an engine over any transport.
    pub fn with_transport(config: RendererConfig, transport: Arc<dyn Transport>) -> Self {
        let diagnostics = Diagnostics::new(config.diagnostics_capacity);
        Self {
            detector: Arc::new(MediaDetector::new(transport, diagnostics)),
            config,
        }
    }

    /// A fresh render controller sharing this engine's detector.
    pub fn renderer(&self) -> MediaRenderer {
        MediaRenderer::new(self.detector.clone())
    }

    /// Props for `url` with the configured default strategy.
    pub fn props(&self, url: &str) -> RenderProps {
        RenderProps::new(url).strategy_name(self.config.default_strategy.as_str())
    }

    /// Mount a renderer, wait for detection to settle and report the result.
    pub async fn render(&self, props: RenderProps) -> anyhow::Result<RenderReport> {
        let renderer = self.renderer();

        tracing::info!(url = %props.url, strategy = %props.detection_strategy, "Rendering");

        if let Some(handle) = renderer.update(props) {
            handle.await?;
        }

        Ok(RenderReport {
            phase: renderer.phase(),
            element: renderer.render(),
            error: renderer.last_error(),
        })
    }

    /// Diagnostics recorded by this engine.
    pub fn diagnostics(&self) -> &Diagnostics {
        self.detector.diagnostics()
    }

    /// Get configuration.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}
