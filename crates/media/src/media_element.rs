//! Render controller for auto-detected media.
//!
//! A [`MediaRenderer`] owns the render state of one mounted element. Every
//! change of the `(url, strategy)` pair starts a fresh detection; only the
//! most recently started detection may commit its result.

use crate::attributes::AttributeMap;
use crate::element::Element;
use crate::kind::{DetectionOutcome, MediaKind};
use crate::strategy::{DetectionStrategyId, MediaDetector};
use common::{DetectError, DetectResult, DiagnosticCategory, Diagnostics};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Host-supplied rendering for one media kind.
///
/// Called with the url, the kind-specific attributes and the generic
/// attributes.
pub type RenderFn = Arc<dyn Fn(&str, &AttributeMap, &AttributeMap) -> Element + Send + Sync>;

/// The `(url, strategy)` pair a detection runs for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceKey {
    pub url: String,
    pub strategy: String,
}

/// Inputs supplied by the host.
#[derive(Clone)]
pub struct RenderProps {
    pub url: String,
    /// Strategy identifier, `fileExtension` unless set.
    pub detection_strategy: String,
    pub image_props: AttributeMap,
    pub video_props: AttributeMap,
    pub render_image: Option<RenderFn>,
    pub render_video: Option<RenderFn>,
    /// Generic attributes passed to whichever output is used.
    pub attributes: AttributeMap,
}

impl RenderProps {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            detection_strategy: DetectionStrategyId::default().as_str().to_string(),
            image_props: AttributeMap::new(),
            video_props: AttributeMap::new(),
            render_image: None,
            render_video: None,
            attributes: AttributeMap::new(),
        }
    }

    pub fn strategy(self, id: DetectionStrategyId) -> Self {
        self.strategy_name(id.as_str())
    }

    /// Set the strategy by raw identifier. Unknown identifiers are reported
    /// when detection runs.
    pub fn strategy_name(mut self, name: impl Into<String>) -> Self {
        self.detection_strategy = name.into();
        self
    }

    pub fn image_props(mut self, attributes: AttributeMap) -> Self {
        self.image_props = attributes;
        self
    }

    pub fn video_props(mut self, attributes: AttributeMap) -> Self {
        self.video_props = attributes;
        self
    }

    pub fn attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    pub fn render_image<F>(mut self, render: F) -> Self
    where
        F: Fn(&str, &AttributeMap, &AttributeMap) -> Element + Send + Sync + 'static,
    {
        self.render_image = Some(Arc::new(render));
        self
    }

    pub fn render_video<F>(mut self, render: F) -> Self
    where
        F: Fn(&str, &AttributeMap, &AttributeMap) -> Element + Send + Sync + 'static,
    {
        self.render_video = Some(Arc::new(render));
        self
    }

    pub fn source_key(&self) -> SourceKey {
        SourceKey {
            url: self.url.clone(),
            strategy: self.detection_strategy.clone(),
        }
    }

    /// Produce the output for a resolved kind.
    pub fn render(&self, kind: MediaKind) -> Element {
        let (specific, custom) = match kind {
            MediaKind::Image => (&self.image_props, &self.render_image),
            MediaKind::Video => (&self.video_props, &self.render_video),
        };

        match custom {
            Some(render) => render(&self.url, specific, &self.attributes),
            None => Element::with_attributes(kind.tag_name(), self.merged_attributes(specific)),
        }
    }

    /// `src`, then generic attributes, then kind-specific ones. `src` always
    /// carries the url.
    fn merged_attributes(&self, specific: &AttributeMap) -> AttributeMap {
        let mut attributes = AttributeMap::with_capacity(1 + self.attributes.len() + specific.len());
        attributes.set("src", self.url.as_str());
        attributes.merge(&self.attributes);
        attributes.merge(specific);
        attributes.set("src", self.url.as_str());
        attributes
    }
}

impl fmt::Debug for RenderProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderProps")
            .field("url", &self.url)
            .field("detection_strategy", &self.detection_strategy)
            .field("image_props", &self.image_props)
            .field("video_props", &self.video_props)
            .field("render_image", &self.render_image.is_some())
            .field("render_video", &self.render_video.is_some())
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Render controller phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderPhase {
    /// No detection attempted yet.
    #[default]
    Idle,
    /// A detection for the current pair is in flight.
    Detecting,
    /// The current pair resolved to a media kind.
    Resolved(MediaKind),
    /// The current pair could not be resolved.
    Unresolved,
}

impl RenderPhase {
    pub fn is_settled(&self) -> bool {
        matches!(self, RenderPhase::Resolved(_) | RenderPhase::Unresolved)
    }
}

#[derive(Debug, Default)]
struct RenderState {
    phase: RenderPhase,
    props: Option<RenderProps>,
    source: Option<SourceKey>,
    /// Incremented for every started detection.
    generation: u64,
    last_error: Option<DetectError>,
}

struct Shared {
    state: RwLock<RenderState>,
    phase_tx: watch::Sender<RenderPhase>,
}

impl Shared {
    /// Apply a detection result if it still belongs to the current pair.
    fn commit(
        &self,
        generation: u64,
        key: &SourceKey,
        result: DetectResult<DetectionOutcome>,
        diagnostics: &Diagnostics,
    ) {
        let mut state = self.state.write();

        if state.generation != generation || state.source.as_ref() != Some(key) {
            tracing::debug!(
                url = %key.url,
                strategy = %key.strategy,
                generation,
                current = state.generation,
                "Discarding stale detection result"
            );
            return;
        }

        let phase = match result {
            Ok(DetectionOutcome::Kind(kind)) => RenderPhase::Resolved(kind),
            Ok(DetectionOutcome::Undetermined) => RenderPhase::Unresolved,
            Err(err) => {
                tracing::error!(url = %key.url, strategy = %key.strategy, error = %err, "Media detection failed");
                diagnostics.emit(DiagnosticCategory::DetectionFailed, Some(err.to_string()));
                state.last_error = Some(err);
                RenderPhase::Unresolved
            }
        };

        state.phase = phase;
        self.phase_tx.send_replace(phase);
    }
}

/// Drives detection for one element and maps the result to output.
pub struct MediaRenderer {
    detector: Arc<MediaDetector>,
    shared: Arc<Shared>,
}

impl MediaRenderer {
    /// Create an idle renderer.
    pub fn new(detector: Arc<MediaDetector>) -> Self {
        let (phase_tx, _) = watch::channel(RenderPhase::Idle);
        Self {
            detector,
            shared: Arc::new(Shared {
                state: RwLock::new(RenderState::default()),
                phase_tx,
            }),
        }
    }

    /// Supply new props.
    ///
    /// Starts a detection on the current tokio runtime when the
    /// `(url, strategy)` pair differs from the previous one and returns its
    /// handle. Otherwise only the presentation props are replaced and `None`
    /// is returned. A new pair always supersedes an in-flight detection.
    pub fn update(&self, props: RenderProps) -> Option<JoinHandle<()>> {
        let key = props.source_key();

        let generation = {
            let mut state = self.shared.state.write();
            state.props = Some(props);

            if state.source.as_ref() == Some(&key) {
                return None;
            }

            state.generation += 1;
            state.source = Some(key.clone());
            state.phase = RenderPhase::Detecting;
            state.last_error = None;
            self.shared.phase_tx.send_replace(RenderPhase::Detecting);
            state.generation
        };

        tracing::debug!(url = %key.url, strategy = %key.strategy, generation, "Starting detection");

        let detector = self.detector.clone();
        let shared = self.shared.clone();
        Some(tokio::spawn(async move {
            let result = detector.detect(&key.url, &key.strategy).await;
            shared.commit(generation, &key, result, detector.diagnostics());
        }))
    }

    /// Current phase.
    pub fn phase(&self) -> RenderPhase {
        self.shared.state.read().phase
    }

    /// Error raised by the latest detection for the current pair, if any.
    pub fn last_error(&self) -> Option<DetectError> {
        self.shared.state.read().last_error.clone()
    }

    /// Subscribe to phase changes.
    pub fn subscribe(&self) -> watch::Receiver<RenderPhase> {
        self.shared.phase_tx.subscribe()
    }

    /// Wait until the current pair has resolved or failed to resolve.
    ///
    /// Returns immediately when idle.
    pub async fn settled(&self) -> RenderPhase {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|phase| !matches!(phase, RenderPhase::Detecting))
            .await
            .map(|phase| *phase);
        settled.unwrap_or_else(|_| self.phase())
    }

    /// Output for the current state; `None` unless resolved.
    pub fn render(&self) -> Option<Element> {
        // Host closures run outside the state lock.
        let (kind, props) = {
            let state = self.shared.state.read();
            match (state.phase, state.props.as_ref()) {
                (RenderPhase::Resolved(kind), Some(props)) => (kind, props.clone()),
                _ => return None,
            }
        };
        Some(props.render(kind))
    }

    pub fn detector(&self) -> &MediaDetector {
        &self.detector
    }
}

impl fmt::Debug for MediaRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.read();
        f.debug_struct("MediaRenderer")
            .field("phase", &state.phase)
            .field("source", &state.source)
            .field("generation", &state.generation)
            .finish()
    }
}
