//! Detection strategies and dispatch.
//!
//! Each strategy is a plain function. They are composed through a
//! [`StrategyRegistry`], a single mapping from identifier to function that
//! is built once; [`MediaDetector`] dispatches through it.

use crate::extension::classify_by_extension;
use crate::kind::DetectionOutcome;
use crate::probe::{probe_by_content_type, probe_by_range};
use common::{DetectError, DetectResult, DiagnosticCategory, Diagnostics};
use futures::future::{self, BoxFuture, FutureExt};
use indexmap::IndexMap;
use networking::Transport;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Identifier selecting a detection heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetectionStrategyId {
    /// Match the url path against known suffixes. No network access.
    #[default]
    FileExtension,
    /// `HEAD` request, classify by `Content-Type`.
    ContentTypeHeader,
    /// `GET` with `Range: bytes=0-0`, classify by `Content-Type`.
    ZeroByteGet,
}

impl DetectionStrategyId {
    pub const ALL: [DetectionStrategyId; 3] = [
        DetectionStrategyId::FileExtension,
        DetectionStrategyId::ContentTypeHeader,
        DetectionStrategyId::ZeroByteGet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionStrategyId::FileExtension => "fileExtension",
            DetectionStrategyId::ContentTypeHeader => "contentTypeHeader",
            DetectionStrategyId::ZeroByteGet => "zeroByteGet",
        }
    }
}

impl fmt::Display for DetectionStrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionStrategyId {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DetectError::unknown_strategy(s))
    }
}

/// What a strategy needs to run.
#[derive(Clone)]
pub struct DetectionContext {
    pub transport: Arc<dyn Transport>,
    pub diagnostics: Diagnostics,
}

impl DetectionContext {
    pub fn new(transport: Arc<dyn Transport>, diagnostics: Diagnostics) -> Self {
        Self {
            transport,
            diagnostics,
        }
    }
}

impl fmt::Debug for DetectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectionContext")
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

pub type StrategyFuture<'a> = BoxFuture<'a, DetectResult<DetectionOutcome>>;

/// A detection strategy.
pub type StrategyFn = for<'a> fn(&'a DetectionContext, &'a str) -> StrategyFuture<'a>;

fn file_extension<'a>(_ctx: &'a DetectionContext, url: &'a str) -> StrategyFuture<'a> {
    future::ready(classify_by_extension(url)).boxed()
}

fn content_type_header<'a>(ctx: &'a DetectionContext, url: &'a str) -> StrategyFuture<'a> {
    async move { Ok(probe_by_content_type(ctx.transport.as_ref(), url, &ctx.diagnostics).await) }
        .boxed()
}

fn zero_byte_get<'a>(ctx: &'a DetectionContext, url: &'a str) -> StrategyFuture<'a> {
    async move { Ok(probe_by_range(ctx.transport.as_ref(), url, &ctx.diagnostics).await) }.boxed()
}

static BUILTIN: Lazy<Arc<StrategyRegistry>> = Lazy::new(|| Arc::new(StrategyRegistry::builtin()));

/// Mapping from strategy identifier to strategy function.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: IndexMap<DetectionStrategyId, StrategyFn>,
}

impl StrategyRegistry {
    /// Registry with no strategies.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with all built-in strategies.
    pub fn builtin() -> Self {
        Self::empty()
            .register(DetectionStrategyId::FileExtension, file_extension)
            .register(DetectionStrategyId::ContentTypeHeader, content_type_header)
            .register(DetectionStrategyId::ZeroByteGet, zero_byte_get)
    }

    /// Shared built-in registry, built on first use.
    pub fn shared() -> Arc<StrategyRegistry> {
        BUILTIN.clone()
    }

    /// Add or replace a strategy.
    pub fn register(mut self, id: DetectionStrategyId, strategy: StrategyFn) -> Self {
        self.strategies.insert(id, strategy);
        self
    }

    pub fn get(&self, id: DetectionStrategyId) -> Option<StrategyFn> {
        self.strategies.get(&id).copied()
    }

    /// Registered identifiers in registration order.
    pub fn ids(&self) -> impl Iterator<Item = DetectionStrategyId> + '_ {
        self.strategies.keys().copied()
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

/// Strategy dispatcher.
#[derive(Clone, Debug)]
pub struct MediaDetector {
    context: DetectionContext,
    registry: Arc<StrategyRegistry>,
}

impl MediaDetector {
    /// Create a detector over the built-in strategies.
    pub fn new(transport: Arc<dyn Transport>, diagnostics: Diagnostics) -> Self {
        Self::with_registry(transport, diagnostics, StrategyRegistry::shared())
    }

    /// Create a detector over a custom registry.
    pub fn with_registry(
        transport: Arc<dyn Transport>,
        diagnostics: Diagnostics,
        registry: Arc<StrategyRegistry>,
    ) -> Self {
        Self {
            context: DetectionContext::new(transport, diagnostics),
            registry,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.context.diagnostics
    }

    /// Detect the media kind of `url` using the strategy named `strategy`.
    ///
    /// Fails only for an unknown strategy identifier or, with the file
    /// extension strategy, a malformed url.
    pub async fn detect(&self, url: &str, strategy: &str) -> DetectResult<DetectionOutcome> {
        let id = strategy.parse::<DetectionStrategyId>()?;
        self.detect_with(url, id).await
    }

    /// Detect the media kind of `url` using a typed strategy identifier.
    pub async fn detect_with(
        &self,
        url: &str,
        id: DetectionStrategyId,
    ) -> DetectResult<DetectionOutcome> {
        let strategy = self
            .registry
            .get(id)
            .ok_or_else(|| DetectError::unknown_strategy(id.as_str()))?;

        tracing::debug!(url, strategy = %id, "Detecting media kind");

        let outcome = strategy(&self.context, url).await?;

        match outcome {
            DetectionOutcome::Kind(kind) => {
                tracing::debug!(url, strategy = %id, %kind, "Media kind detected");
            }
            DetectionOutcome::Undetermined => {
                self.context
                    .diagnostics
                    .emit(DiagnosticCategory::Undetermined, Some(url.to_string()));
            }
        }

        Ok(outcome)
    }
}
