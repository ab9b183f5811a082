//! Common types shared across the media detection crates.

pub mod diagnostics;
pub mod error;

pub use diagnostics::{Diagnostic, DiagnosticCategory, Diagnostics};
pub use error::{DetectError, DetectResult};
