//! Route handlers and the routing table.
//!
//! One handler per route, each a thin async wrapper that picks the matching
//! provider call and wraps its body in the fixed relay reply. Failure maps
//! to an opaque 502 at the [`IntoResponse`](crate::IntoResponse) boundary.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::upstream::Providers;

/// Shared relay state: configuration, the outbound HTTP client and the
/// signer, constructed once at startup.
pub struct Relay {
    providers: Providers,
}

impl Relay {
    pub fn new(config: Config) -> Self {
        Self { providers: Providers::new(config) }
    }
}

/// Builds the routing table over a shared [`Relay`].
pub fn routes(relay: Arc<Relay>) -> Router {
    let current = Arc::clone(&relay);
    let historic = Arc::clone(&relay);
    let station = Arc::clone(&relay);
    let forecast = relay;

    Router::new()
        .get("/", move |req| current_weather(Arc::clone(&current), req))
        .get("/historic", move |req| historic_weather(Arc::clone(&historic), req))
        .get("/station-data", move |req| station_data(Arc::clone(&station), req))
        .get("/forecast", move |req| get_forecast(Arc::clone(&forecast), req))
}

// GET /
async fn current_weather(relay: Arc<Relay>, _req: Request) -> Result<Response, Error> {
    Ok(Response::relay(relay.providers.current_weather().await?))
}

// GET /historic
async fn historic_weather(relay: Arc<Relay>, _req: Request) -> Result<Response, Error> {
    Ok(Response::relay(relay.providers.historic_weather().await?))
}

// GET /station-data
async fn station_data(relay: Arc<Relay>, _req: Request) -> Result<Response, Error> {
    Ok(Response::relay(relay.providers.station_data().await?))
}

// GET /forecast
async fn get_forecast(relay: Arc<Relay>, _req: Request) -> Result<Response, Error> {
    Ok(Response::relay(relay.providers.forecast().await?))
}
