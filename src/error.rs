//! Unified error type.

use thiserror::Error as ThisError;

/// The error type for everything that can go wrong in the relay.
///
/// Routing misses are not errors — they are 404 [`Response`](crate::Response)
/// values. This type covers infrastructure failures (bind, accept),
/// configuration problems caught at startup, and per-request upstream
/// failures, which the dispatcher collapses into an opaque 502.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address: {0}")]
    Addr(#[from] std::net::AddrParseError),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    /// A parameter named in a signing set has no value. A signature over
    /// incomplete data would only surface as an upstream auth rejection,
    /// so the relay refuses to compute one.
    #[error("signing parameter {0:?} has no value")]
    MissingParameter(&'static str),

    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream declared JSON but the body does not parse: {0}")]
    MalformedJson(#[from] serde_json::Error),
}
