//! Mapping of HTTP failures onto `SourceError`

use harvester_domain::traits::SourceError;
use reqwest::StatusCode;

/// Classify a transport-level failure
pub(crate) fn from_reqwest(e: reqwest::Error) -> SourceError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        SourceError::Transient(format!("Request failed: {}", e))
    } else if e.is_decode() {
        SourceError::Fatal(format!("Unparsable response: {}", e))
    } else {
        SourceError::Transient(e.to_string())
    }
}

/// Classify a non-success HTTP status
///
/// A 400 is only blamed on the cursor when a page token was actually sent.
pub(crate) fn from_status(status: StatusCode, token_sent: bool, body: &str) -> SourceError {
    let message = format!("HTTP {}: {}", status, body.trim());
    match status {
        StatusCode::TOO_MANY_REQUESTS => SourceError::Transient(message),
        s if s.is_server_error() => SourceError::Transient(message),
        StatusCode::BAD_REQUEST if token_sent => SourceError::InvalidCursor(message),
        _ => SourceError::Fatal(message),
    }
}
