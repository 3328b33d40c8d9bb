//! Nominatim free-form search client
//!
//! One query string in, at most one coordinate pair out. Rate limiting and
//! memoization live in the resolver; this module only speaks HTTP.

use crate::config::GeocoderConfig;
use crate::geocode::GeocodeError;
use crate::BalizasError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;

/// A matched point in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// HTTP client bound to one Nominatim endpoint
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    endpoint: String,
    country_code: String,
}

impl NominatimClient {
    /// Builds the client with the identifying user agent the service asks for
    pub fn new(config: &GeocoderConfig) -> Result<Self, BalizasError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            country_code: config.country_code.to_lowercase(),
        })
    }

    /// Runs one free-form search restricted to the configured country
    ///
    /// # Returns
    ///
    /// * `Ok(Some(_))` - The first hit's coordinates
    /// * `Ok(None)` - The service answered with no hits
    /// * `Err(GeocodeError)` - Transport failure, throttling, or a malformed body
    pub async fn search(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", self.country_code.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        parse_response(&body)
    }
}

/// Reads the first hit of a Nominatim JSON answer
///
/// Nominatim returns coordinates as decimal strings; plain numbers are
/// accepted too.
pub fn parse_response(body: &serde_json::Value) -> Result<Option<Coordinates>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let latitude = degrees(&first["lat"]).ok_or_else(|| GeocodeError::Parse {
        message: "missing lat in Nominatim response".to_string(),
    })?;
    let longitude = degrees(&first["lon"]).ok_or_else(|| GeocodeError::Parse {
        message: "missing lon in Nominatim response".to_string(),
    })?;

    Ok(Some(Coordinates {
        latitude,
        longitude,
    }))
}

fn degrees(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::String(s) => s.trim().parse().ok(),
        other => other.as_f64(),
    }
}
