//! Media Renderer - detect whether a url is an image or a video and render it.
//!
//! This crate wires the detection stack into a host:
//! - Configuration (defaults, JSON file, CLI overrides)
//! - HTTP transport setup
//! - One-shot rendering through the render controller

pub mod config;
pub mod engine;

pub use config::RendererConfig;
pub use engine::{RenderEngine, RenderReport};

/// Renderer version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
