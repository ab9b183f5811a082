//! Classification by file extension.

use crate::kind::{DetectionOutcome, MediaKind};
use common::{DetectError, DetectResult};
use url::Url;

/// Image suffixes, matched against the lower-cased url path.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp", ".ico",
];

/// Video suffixes, matched against the lower-cased url path.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".webm", ".ogg", ".avi", ".mov", ".wmv", ".flv", ".mkv",
];

/// Classify a url by the suffix of its path.
///
/// Query strings and fragments never take part in matching. Image suffixes
/// are checked before video suffixes.
pub fn classify_by_extension(url: &str) -> DetectResult<DetectionOutcome> {
    let parsed = Url::parse(url).map_err(|e| DetectError::invalid_url(format!("{}: {}", url, e)))?;
    Ok(classify_path(parsed.path()))
}

/// Classify an already-extracted url path.
pub fn classify_path(path: &str) -> DetectionOutcome {
    let path = path.to_lowercase();

    if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return DetectionOutcome::Kind(MediaKind::Image);
    }

    if VIDEO_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return DetectionOutcome::Kind(MediaKind::Video);
    }

    DetectionOutcome::Undetermined
}
