//! Media kind detection and rendering.
//!
//! This crate provides:
//! - Classifiers mapping a url suffix or a content type to a media kind
//! - Network probers (HEAD and zero-byte ranged GET)
//! - A strategy registry and dispatcher over those heuristics
//! - A render controller that turns a detected kind into an element

pub mod attributes;
pub mod content_type;
pub mod element;
pub mod extension;
pub mod kind;
pub mod media_element;
pub mod probe;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_support;

pub use attributes::AttributeMap;
pub use content_type::classify_by_content_type;
pub use element::Element;
pub use extension::classify_by_extension;
pub use kind::{DetectionOutcome, MediaKind};
pub use media_element::{MediaRenderer, RenderFn, RenderPhase, RenderProps, SourceKey};
pub use probe::{probe_by_content_type, probe_by_range};
pub use strategy::{DetectionContext, DetectionStrategyId, MediaDetector, StrategyRegistry};
