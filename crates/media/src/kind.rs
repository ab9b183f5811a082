//! Media kinds and detection outcomes.

use std::fmt;

/// Kind of media a url points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Tag of the element that renders this kind.
    pub fn tag_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "img",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one detection attempt.
///
/// `Undetermined` is a legitimate outcome, not an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetectionOutcome {
    Kind(MediaKind),
    #[default]
    Undetermined,
}

impl DetectionOutcome {
    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            DetectionOutcome::Kind(kind) => Some(*kind),
            DetectionOutcome::Undetermined => None,
        }
    }

    pub fn is_determined(&self) -> bool {
        matches!(self, DetectionOutcome::Kind(_))
    }
}

impl From<MediaKind> for DetectionOutcome {
    fn from(kind: MediaKind) -> Self {
        DetectionOutcome::Kind(kind)
    }
}

impl From<Option<MediaKind>> for DetectionOutcome {
    fn from(kind: Option<MediaKind>) -> Self {
        kind.map_or(DetectionOutcome::Undetermined, DetectionOutcome::Kind)
    }
}

impl fmt::Display for DetectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionOutcome::Kind(kind) => kind.fmt(f),
            DetectionOutcome::Undetermined => f.write_str("undetermined"),
        }
    }
}
