//! Upstream response normalization.
//!
//! Every upstream body is reduced to a single string before it is relayed.
//! The branch is driven purely by the declared `content-type`; the HTTP
//! status code is never inspected, so a 4xx/5xx upstream body is forwarded
//! exactly like a 200 body. Callers that want stricter semantics put them
//! in front of the relay, not inside it.

use http::header::CONTENT_TYPE;

use crate::error::Error;

/// How an upstream body is rendered, classified from its `content-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/json`: parsed and re-serialized compactly.
    Json,
    /// Everything else, including a missing header: passed through verbatim.
    Text,
}

/// Classifies a `content-type` header value. Absent headers classify as
/// [`BodyKind::Text`] via the empty string.
pub fn classify(content_type: &str) -> BodyKind {
    if content_type.contains("application/json") {
        BodyKind::Json
    } else {
        BodyKind::Text
    }
}

/// Renders a body string according to its kind.
///
/// The JSON round trip strips insignificant whitespace — the relay has
/// always emitted compact JSON and downstream consumers depend on it.
///
/// # Errors
///
/// [`Error::MalformedJson`] when a declared-JSON body does not parse; the
/// request fails rather than forwarding bytes the caller was promised were
/// JSON.
pub fn normalize_body(kind: BodyKind, body: &str) -> Result<String, Error> {
    match kind {
        BodyKind::Json => {
            let value: serde_json::Value = serde_json::from_str(body)?;
            Ok(value.to_string())
        }
        BodyKind::Text => Ok(body.to_owned()),
    }
}

/// Classifies and renders one upstream response, consuming its body.
pub async fn normalize(response: reqwest::Response) -> Result<String, Error> {
    let kind = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(BodyKind::Text, classify);

    let body = response.text().await?;
    normalize_body(kind, &body)
}
