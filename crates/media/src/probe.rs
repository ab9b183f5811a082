//! Network probers.
//!
//! Both probers look only at the response status and the `Content-Type`
//! header. They never fail: bad statuses and transport errors become an
//! undetermined outcome plus a diagnostic.

use crate::content_type::classify_by_content_type;
use crate::kind::DetectionOutcome;
use common::{DiagnosticCategory, Diagnostics};
use networking::headers::content_type;
use networking::{ClientError, Request, Response, Transport};

/// Classify `url` by the content type of a `HEAD` response.
pub async fn probe_by_content_type(
    transport: &dyn Transport,
    url: &str,
    diagnostics: &Diagnostics,
) -> DetectionOutcome {
    let response = match send(transport, Request::head(url)).await {
        Ok(response) => response,
        Err(err) => return transport_failure(url, &err, diagnostics),
    };

    if !response.is_success() {
        return status_failure(url, &response, diagnostics);
    }

    classify_response(&response, diagnostics)
}

/// Classify `url` by the content type of a `GET` for its first byte.
///
/// For servers and proxies that reject `HEAD`. Both 200 and 206 count as
/// success; the body is never read.
pub async fn probe_by_range(
    transport: &dyn Transport,
    url: &str,
    diagnostics: &Diagnostics,
) -> DetectionOutcome {
    let response = match send(transport, Request::first_byte(url)).await {
        Ok(response) => response,
        Err(err) => return transport_failure(url, &err, diagnostics),
    };

    if !(response.is_success() || response.is_partial()) {
        return status_failure(url, &response, diagnostics);
    }

    classify_response(&response, diagnostics)
}

async fn send(
    transport: &dyn Transport,
    request: Result<Request, ClientError>,
) -> Result<Response, ClientError> {
    transport.execute(request?).await
}

fn classify_response(response: &Response, diagnostics: &Diagnostics) -> DetectionOutcome {
    let value = response.content_type();
    tracing::debug!(
        url = %response.url(),
        status = response.status().as_u16(),
        content_type = ?value.and_then(content_type::essence),
        "Probe succeeded"
    );
    classify_by_content_type(value, diagnostics)
}

fn status_failure(url: &str, response: &Response, diagnostics: &Diagnostics) -> DetectionOutcome {
    tracing::debug!(url, status = response.status().as_u16(), "Probe rejected");
    diagnostics.emit(
        DiagnosticCategory::FetchFailed,
        Some(response.status().as_u16().to_string()),
    );
    DetectionOutcome::Undetermined
}

fn transport_failure(url: &str, err: &ClientError, diagnostics: &Diagnostics) -> DetectionOutcome {
    tracing::debug!(url, error = %err, "Probe request failed");
    diagnostics.emit(DiagnosticCategory::FetchError, Some(err.to_string()));
    DetectionOutcome::Undetermined
}
