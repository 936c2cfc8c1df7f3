//! Environment-driven configuration.
//!
//! Every secret is validated at startup. A missing credential would
//! otherwise surface only as an upstream rejection of a malformed URL or a
//! bad signature, so [`Config::from_env`] fails the process before it ever
//! binds a socket.
//!
//! A `.env` file is honored for local development (loaded in `main`).

use std::env;

use crate::error::Error;

const WEATHERLINK_V1: &str = "https://api.weatherlink.com/v1";
const WEATHERLINK_V2: &str = "https://api.weatherlink.com/v2";
const OPENWEATHER: &str = "https://api.openweathermap.org/data/2.5";

/// Relay configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the server binds, e.g. `0.0.0.0:3000`.
    pub listen_addr: String,

    /// WeatherLink station identifier, shared by the v1 and v2 endpoints.
    pub station_id: String,

    // WeatherLink v1 (legacy fixed-key) credentials.
    pub v1_user: String,
    pub v1_password: String,
    pub v1_token: String,

    // WeatherLink v2 key pair; the secret feeds the HMAC signer.
    pub v2_key: String,
    pub v2_secret: String,

    /// OpenWeatherMap API key.
    pub forecast_key: String,

    // Fixed coordinates for the forecast call. Kept as the exact text the
    // operator supplied so the outbound query reproduces it byte for byte.
    pub latitude: String,
    pub longitude: String,

    // Provider base URLs, overridable so URL construction is testable and
    // staging endpoints are reachable without a rebuild.
    pub v1_base: String,
    pub v2_base: String,
    pub forecast_base: String,
}

impl Config {
    /// Reads the full configuration from the process environment.
    ///
    /// # Errors
    ///
    /// [`Error::MissingEnv`] for any absent or empty credential;
    /// [`Error::InvalidEnv`] for coordinates that are not decimal numbers.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            listen_addr: optional("LISTEN_ADDR", "0.0.0.0:3000"),
            station_id: optional("STATION_ID", "33062"),
            v1_user: required("WEATHERLINK_V1_USER")?,
            v1_password: required("WEATHERLINK_V1_PASSWORD")?,
            v1_token: required("WEATHERLINK_V1_TOKEN")?,
            v2_key: required("WEATHERLINK_V2_KEY")?,
            v2_secret: required("WEATHERLINK_V2_SECRET")?,
            forecast_key: required("OPENWEATHER_API_KEY")?,
            latitude: coordinate("FORECAST_LAT", "42.84655")?,
            longitude: coordinate("FORECAST_LON", "-88.74374")?,
            v1_base: base_url("WEATHERLINK_V1_URL", WEATHERLINK_V1),
            v2_base: base_url("WEATHERLINK_V2_URL", WEATHERLINK_V2),
            forecast_base: base_url("OPENWEATHER_URL", OPENWEATHER),
        })
    }
}

/// A variable that must be present and non-empty. An empty credential would
/// produce a well-formed URL the provider silently rejects, so it counts as
/// missing.
fn required(name: &'static str) -> Result<String, Error> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingEnv(name)),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_owned())
}

/// A coordinate keeps its source text but must parse as a decimal number.
fn coordinate(name: &'static str, default: &str) -> Result<String, Error> {
    let value = optional(name, default);
    if value.parse::<f64>().is_err() {
        return Err(Error::InvalidEnv { name, value });
    }
    Ok(value)
}

/// Base URLs tolerate a trailing slash; paths are appended with one.
fn base_url(name: &str, default: &str) -> String {
    let value = optional(name, default);
    value.trim_end_matches('/').to_owned()
}
