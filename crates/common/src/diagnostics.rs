//! Host-visible diagnostics channel.
//!
//! Non-fatal detection failures are reported here instead of being thrown.
//! Every entry is also emitted as a `tracing` event so a host that only
//! installs a subscriber still sees them.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Content type was absent or neither `image/*` nor `video/*`.
    UnsupportedMediaType,
    /// Probe got a non-success status code.
    FetchFailed,
    /// Probe request failed at the transport layer.
    FetchError,
    /// A strategy could not establish a media kind for a url.
    Undetermined,
    /// Detection was rejected with an error (unknown strategy, invalid url).
    DetectionFailed,
}

impl DiagnosticCategory {
    /// Fixed message prefix for the category.
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticCategory::UnsupportedMediaType => "Unsupported media type:",
            DiagnosticCategory::FetchFailed => "Failed to fetch content type:",
            DiagnosticCategory::FetchError => "Error fetching content type:",
            DiagnosticCategory::Undetermined => "Unable to determine media type:",
            DiagnosticCategory::DetectionFailed => "Media detection failed:",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCategory::UnsupportedMediaType => "unsupported_media_type",
            DiagnosticCategory::FetchFailed => "fetch_failed",
            DiagnosticCategory::FetchError => "fetch_error",
            DiagnosticCategory::Undetermined => "undetermined",
            DiagnosticCategory::DetectionFailed => "detection_failed",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic entry.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    /// Offending value. `None` when the value itself was absent.
    pub payload: Option<String>,
    pub timestamp: SystemTime,
}

impl Diagnostic {
    pub fn new(category: DiagnosticCategory, payload: Option<String>) -> Self {
        Self {
            category,
            payload,
            timestamp: SystemTime::now(),
        }
    }

    pub fn message(&self) -> &'static str {
        self.category.message()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(payload) => write!(f, "{} {}", self.message(), payload),
            None => write!(f, "{} null", self.message()),
        }
    }
}

struct DiagnosticBuffer {
    entries: Vec<Diagnostic>,
    max_entries: usize,
}

/// Shared, bounded diagnostics buffer.
///
/// Cloning yields another handle to the same buffer.
#[derive(Clone)]
pub struct Diagnostics {
    inner: Arc<RwLock<DiagnosticBuffer>>,
}

impl Diagnostics {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(DiagnosticBuffer {
                entries: Vec::new(),
                max_entries: max_entries.max(1),
            })),
        }
    }

    /// Record a diagnostic and mirror it to the tracing stream.
    pub fn emit(&self, category: DiagnosticCategory, payload: Option<String>) {
        let entry = Diagnostic::new(category, payload);

        match category {
            DiagnosticCategory::DetectionFailed => {
                tracing::error!(category = %category, "{}", entry)
            }
            _ => tracing::warn!(category = %category, "{}", entry),
        }

        let mut buffer = self.inner.write();
        buffer.entries.push(entry);
        if buffer.entries.len() > buffer.max_entries {
            buffer.entries.remove(0);
        }
    }

    /// Snapshot of all buffered entries, oldest first.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.inner.read().entries.clone()
    }

    /// Entries of one category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<Diagnostic> {
        self.inner
            .read()
            .entries
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect()
    }

    /// Check whether an entry with this category and payload was recorded.
    pub fn contains(&self, category: DiagnosticCategory, payload: Option<&str>) -> bool {
        self.inner
            .read()
            .entries
            .iter()
            .any(|d| d.category == category && d.payload.as_deref() == payload)
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().entries.clear();
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("entries", &self.len())
            .finish()
    }
}
