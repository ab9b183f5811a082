//! Classification by declared content type.

use crate::kind::{DetectionOutcome, MediaKind};
use common::{DiagnosticCategory, Diagnostics};
use networking::headers::content_type;

/// Map a `Content-Type` value to a media kind.
///
/// Anything other than `image/*` or `video/*`, including an absent header,
/// is undetermined and reported as an unsupported media type.
pub fn classify_by_content_type(
    value: Option<&str>,
    diagnostics: &Diagnostics,
) -> DetectionOutcome {
    match value {
        Some(ct) if content_type::is_image(ct) => DetectionOutcome::Kind(MediaKind::Image),
        Some(ct) if content_type::is_video(ct) => DetectionOutcome::Kind(MediaKind::Video),
        other => {
            diagnostics.emit(
                DiagnosticCategory::UnsupportedMediaType,
                other.map(str::to_string),
            );
            DetectionOutcome::Undetermined
        }
    }
}
