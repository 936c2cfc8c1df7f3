//! Request signing for the WeatherLink v2 API.
//!
//! WeatherLink v2 authenticates calls with an HMAC-SHA256 signature over a
//! canonical parameter string: the participating parameter names sorted
//! lexicographically, each immediately followed by its value, with no
//! separators. The hex digest goes into the `api-signature` query parameter.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::Error;

type HmacSha256 = Hmac<Sha256>;

/// Parameter names that participate in signing and query construction.
pub const API_KEY: &str = "api-key";
pub const STATION_ID: &str = "station-id";
pub const T: &str = "t";
pub const START_TIMESTAMP: &str = "start-timestamp";
pub const END_TIMESTAMP: &str = "end-timestamp";

/// The parameters of one signed request.
///
/// Scoped per request: each handler builds a fresh set containing exactly
/// the keys it assigns, so values can never leak between requests and two
/// concurrent requests can never observe each other's `t`.
#[derive(Debug, Default)]
pub struct ParamSet {
    values: HashMap<&'static str, String>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Computes WeatherLink v2 request signatures with a process-wide secret.
#[derive(Debug, Clone)]
pub struct Signer {
    secret: String,
}

impl Signer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Signs the named subset of `params`.
    ///
    /// Sorts `names` in ascending byte order, concatenates `name + value`
    /// for each, and returns the lowercase hex HMAC-SHA256 digest of that
    /// string (64 characters).
    ///
    /// # Errors
    ///
    /// [`Error::MissingParameter`] if any name in `names` has no value in
    /// `params`. The signature is never computed over incomplete data.
    pub fn sign(&self, params: &ParamSet, names: &[&'static str]) -> Result<String, Error> {
        let mut names = names.to_vec();
        names.sort_unstable();

        let mut canonical = String::new();
        for name in names {
            let value = params.get(name).ok_or(Error::MissingParameter(name))?;
            canonical.push_str(name);
            canonical.push_str(value);
        }

        // HMAC accepts keys of any length, so this cannot fail.
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("hmac key of any length is valid");
        mac.update(canonical.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
