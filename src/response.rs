//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Every reply the relay sends carries the same fixed header set:
//! `Content-Type: application/json;charset=UTF-8` and
//! `Access-Control-Allow-Origin: *`. The CORS header is what lets pages on
//! other domains call the relay at all; the content type is declared JSON
//! even when an upstream handed back HTML, because that is the contract
//! consumers have always been given.

use bytes::Bytes;
use http::StatusCode;
use http::header::HeaderValue;
use http_body_util::Full;
use tracing::error;

use crate::error::Error;

const CONTENT_TYPE_JSON_UTF8: &str = "application/json;charset=UTF-8";
const ALLOW_ALL_ORIGINS: &str = "*";

/// An outgoing HTTP response.
pub struct Response {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Vec<u8>,
}

impl Response {
    /// `200 OK` with a normalized upstream body and the fixed header set.
    pub fn relay(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some(CONTENT_TYPE_JSON_UTF8),
            body: body.into_bytes(),
        }
    }

    /// A bodyless response. Still carries the CORS header so browsers
    /// surface the status instead of a cross-origin block.
    pub fn status(status: StatusCode) -> Self {
        Self { status, content_type: None, body: Vec::new() }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut response = http::Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        if let Some(content_type) = self.content_type {
            headers.insert("content-type", HeaderValue::from_static(content_type));
        }
        headers.insert(
            "access-control-allow-origin",
            HeaderValue::from_static(ALLOW_ALL_ORIGINS),
        );
        response
    }
}

/// Conversion into an HTTP [`Response`].
///
/// Handlers return whatever implements this; the dispatcher converts at the
/// boundary.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

/// Fallible handlers collapse failures into an opaque `502 Bad Gateway`
/// with no body. The cause goes to the log, never to the caller.
impl IntoResponse for Result<Response, Error> {
    fn into_response(self) -> Response {
        match self {
            Ok(response) => response,
            Err(e) => {
                error!("request failed: {e}");
                Response::status(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_response_carries_fixed_headers() {
        let http = Response::relay(r#"{"a":1}"#.to_owned()).into_http();
        assert_eq!(http.status(), StatusCode::OK);
        assert_eq!(
            http.headers().get("content-type").unwrap(),
            "application/json;charset=UTF-8"
        );
        assert_eq!(http.headers().get("access-control-allow-origin").unwrap(), "*");
    }

    #[test]
    fn status_response_has_cors_but_no_content_type() {
        let http = Response::status(StatusCode::NOT_FOUND).into_http();
        assert_eq!(http.status(), StatusCode::NOT_FOUND);
        assert!(http.headers().get("content-type").is_none());
        assert_eq!(http.headers().get("access-control-allow-origin").unwrap(), "*");
    }

    #[test]
    fn handler_error_becomes_opaque_bad_gateway() {
        let result: Result<Response, Error> = Err(Error::MissingParameter("t"));
        let response = result.into_response();
        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
        assert!(response.body().is_empty());
    }
}
