//! Outbound weather provider clients.
//!
//! Three providers, one shared [`reqwest::Client`]. Every client does the
//! same thing: build a ready-to-fetch URL, issue exactly one GET with no
//! custom headers, and hand the response to the normalizer. URL construction
//! is split from the fetch so each query string is testable offline.
//!
//! No timeout beyond reqwest's defaults and no retry: a transport error
//! fails the inbound request that triggered it.

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::normalize;
use crate::sign::{API_KEY, END_TIMESTAMP, ParamSet, START_TIMESTAMP, STATION_ID, Signer, T};

/// The signed historic window starts at the most recent local midnight plus
/// this many seconds (6 h) and ends now.
const HISTORIC_START_OFFSET: i64 = 6 * 3600;

/// The three upstream weather providers behind the relay.
pub struct Providers {
    client: Client,
    config: Config,
    signer: Signer,
}

impl Providers {
    pub fn new(config: Config) -> Self {
        let signer = Signer::new(config.v2_secret.clone());
        Self { client: Client::new(), config, signer }
    }

    /// WeatherLink v1 NOAA station data. Legacy fixed-key endpoint — the
    /// credentials ride in the query string, no signature.
    pub async fn station_data(&self) -> Result<String, Error> {
        let url = self.station_data_url()?;
        self.fetch(url).await
    }

    fn station_data_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}/NoaaExt.json", self.config.v1_base))?;
        url.query_pairs_mut()
            .append_pair("user", &self.config.v1_user)
            .append_pair("pass", &self.config.v1_password)
            .append_pair("apiToken", &self.config.v1_token);
        Ok(url)
    }

    /// WeatherLink v2 current conditions, signed over
    /// {`api-key`, `station-id`, `t`}.
    pub async fn current_weather(&self) -> Result<String, Error> {
        let url = self.current_weather_url(Utc::now().timestamp())?;
        self.fetch(url).await
    }

    fn current_weather_url(&self, t: i64) -> Result<Url, Error> {
        let params = self.signed_params(t);
        let signature = self.signer.sign(&params, &[API_KEY, STATION_ID, T])?;

        let mut url = Url::parse(&format!(
            "{}/current/{}",
            self.config.v2_base, self.config.station_id
        ))?;
        url.query_pairs_mut()
            .append_pair("api-key", &self.config.v2_key)
            .append_pair("api-signature", &signature)
            .append_pair("t", &t.to_string());
        Ok(url)
    }

    /// WeatherLink v2 historic conditions from local midnight + 6 h to now,
    /// signed over all five parameters.
    pub async fn historic_weather(&self) -> Result<String, Error> {
        let (start, end) = historic_window(&Local::now());
        let url = self.historic_weather_url(Utc::now().timestamp(), start, end)?;
        self.fetch(url).await
    }

    fn historic_weather_url(&self, t: i64, start: i64, end: i64) -> Result<Url, Error> {
        let mut params = self.signed_params(t);
        params.set(START_TIMESTAMP, start.to_string());
        params.set(END_TIMESTAMP, end.to_string());
        let signature = self.signer.sign(
            &params,
            &[API_KEY, STATION_ID, T, START_TIMESTAMP, END_TIMESTAMP],
        )?;

        let mut url = Url::parse(&format!(
            "{}/historic/{}",
            self.config.v2_base, self.config.station_id
        ))?;
        url.query_pairs_mut()
            .append_pair("api-key", &self.config.v2_key)
            .append_pair("api-signature", &signature)
            .append_pair("t", &t.to_string())
            .append_pair("start-timestamp", &start.to_string())
            .append_pair("end-timestamp", &end.to_string());
        Ok(url)
    }

    /// OpenWeatherMap one-call forecast for the configured coordinates,
    /// hourly data excluded. No signature.
    pub async fn forecast(&self) -> Result<String, Error> {
        let url = self.forecast_url()?;
        self.fetch(url).await
    }

    fn forecast_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&format!("{}/onecall", self.config.forecast_base))?;
        url.query_pairs_mut()
            .append_pair("lat", &self.config.latitude)
            .append_pair("lon", &self.config.longitude)
            .append_pair("exclude", "hourly")
            .append_pair("appid", &self.config.forecast_key);
        Ok(url)
    }

    /// The base signed parameter set. `t` reflects call time, assigned fresh
    /// for every request immediately before signing.
    fn signed_params(&self, t: i64) -> ParamSet {
        let mut params = ParamSet::new();
        params.set(API_KEY, self.config.v2_key.clone());
        params.set(STATION_ID, self.config.station_id.clone());
        params.set(T, t.to_string());
        params
    }

    /// One GET, no custom headers, body normalized. The status code is not
    /// inspected — non-2xx upstream bodies are forwarded like any other.
    async fn fetch(&self, url: Url) -> Result<String, Error> {
        debug!(host = %url.host_str().unwrap_or(""), path = url.path(), "outbound GET");
        let response = self.client.get(url).send().await?;
        normalize::normalize(response).await
    }
}

/// Computes the historic query window: most recent local midnight + 6 h to
/// `now`, both as Unix seconds.
fn historic_window<Tz: TimeZone>(now: &DateTime<Tz>) -> (i64, i64) {
    // Midnight can fall inside a DST gap; fall back to `now` rather than panic.
    let midnight = now
        .with_time(NaiveTime::MIN)
        .earliest()
        .unwrap_or_else(|| now.clone());
    (midnight.timestamp() + HISTORIC_START_OFFSET, now.timestamp())
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn config() -> Config {
        Config {
            listen_addr: "127.0.0.1:0".into(),
            station_id: "33062".into(),
            v1_user: "user1".into(),
            v1_password: "pass1".into(),
            v1_token: "token1".into(),
            v2_key: "key2".into(),
            v2_secret: "secret2".into(),
            forecast_key: "owkey".into(),
            latitude: "42.84655".into(),
            longitude: "-88.74374".into(),
            v1_base: "https://v1.example.com/v1".into(),
            v2_base: "https://v2.example.com/v2".into(),
            forecast_base: "https://ow.example.com/data/2.5".into(),
        }
    }

    fn providers() -> Providers {
        Providers::new(config())
    }

    #[test]
    fn station_data_url_carries_all_three_credentials() {
        let url = providers().station_data_url().unwrap();
        assert_eq!(url.path(), "/v1/NoaaExt.json");
        assert_eq!(
            url.query().unwrap(),
            "user=user1&pass=pass1&apiToken=token1"
        );
    }

    #[test]
    fn current_weather_url_has_signed_query_in_order() {
        let url = providers().current_weather_url(1700000000).unwrap();
        assert_eq!(url.path(), "/v2/current/33062");

        let query = url.query().unwrap();
        let key_pos = query.find("api-key=").unwrap();
        let sig_pos = query.find("api-signature=").unwrap();
        let t_pos = query.find("t=1700000000").unwrap();
        assert!(key_pos < sig_pos && sig_pos < t_pos);
    }

    #[test]
    fn current_weather_signature_is_64_lowercase_hex() {
        let url = providers().current_weather_url(1700000000).unwrap();
        let (_, sig) = url
            .query_pairs()
            .find(|(k, _)| k == "api-signature")
            .unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn historic_url_carries_window_bounds() {
        let url = providers()
            .historic_weather_url(1700000300, 1700000100, 1700000200)
            .unwrap();
        assert_eq!(url.path(), "/v2/historic/33062");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let names: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            ["api-key", "api-signature", "t", "start-timestamp", "end-timestamp"]
        );
        assert_eq!(pairs[3].1, "1700000100");
        assert_eq!(pairs[4].1, "1700000200");
    }

    #[test]
    fn forecast_url_uses_fixed_coordinates() {
        let url = providers().forecast_url().unwrap();
        assert_eq!(url.path(), "/data/2.5/onecall");
        assert_eq!(
            url.query().unwrap(),
            "lat=42.84655&lon=-88.74374&exclude=hourly&appid=owkey"
        );
    }

    #[test]
    fn historic_window_is_midnight_plus_six_hours_to_now() {
        // 2024-01-15T10:00:00 at a fixed -06:00 offset.
        let tz = FixedOffset::west_opt(6 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();

        let (start, end) = historic_window(&now);
        let expected_start = tz.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        assert_eq!(start, expected_start.timestamp());
        assert_eq!(end, now.timestamp());
    }

    #[test]
    fn historic_window_at_exact_midnight() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

        let (start, end) = historic_window(&now);
        // Start lands six hours after `now`; the provider clamps the empty
        // window, matching the behavior the relay has always had.
        assert_eq!(start, end + HISTORIC_START_OFFSET);
    }
}
