//! # wxrelay
//!
//! A small edge-deployed HTTP relay for weather data.
//!
//! wxrelay accepts inbound GET requests, routes them by exact path to one of
//! four outbound calls against third-party providers, signs the WeatherLink
//! v2 requests with HMAC-SHA256, and returns the upstream body under a fixed
//! header set (`Content-Type: application/json;charset=UTF-8` plus
//! `Access-Control-Allow-Origin: *` so pages on other domains can call it).
//!
//! ## Routes
//!
//! | Path | Upstream |
//! |---|---|
//! | `/` | WeatherLink v2 current conditions (signed) |
//! | `/historic` | WeatherLink v2 historic conditions, local midnight + 6 h to now (signed) |
//! | `/station-data` | WeatherLink v1 NOAA station data (fixed-key) |
//! | `/forecast` | OpenWeatherMap one-call forecast for a fixed coordinate pair |
//!
//! Anything else is a 404 with an empty body.
//!
//! ## What wxrelay intentionally skips
//!
//! The relay is stateless and does one outbound GET per inbound request.
//! There is no caching, no retry, no inbound authentication and no rate
//! limiting — the edge in front of it owns those. An upstream failure fails
//! the whole request with an opaque 502.

mod config;
mod error;
mod handler;
mod handlers;
mod normalize;
mod request;
mod response;
mod router;
mod server;
mod sign;
mod upstream;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use handlers::{Relay, routes};
pub use normalize::{BodyKind, classify, normalize_body};
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::{Server, respond};
pub use sign::{ParamSet, Signer};
