//! HTTP fetcher for the incident listing
//!
//! This module handles the single request the pipeline makes per refresh:
//! - Building a client that looks like a desktop browser
//! - GET with a whole-request timeout
//! - Error classification (timeout, transport, non-2xx)
//!
//! There is no retry; an unreachable source is the caller's problem.

use crate::config::SourceConfig;
use crate::BalizasError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Builds the HTTP client used against the incident source
///
/// # Arguments
///
/// * `config` - The source configuration (user agent, language, timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(BalizasError)` - A header value was invalid or the client failed to build
pub fn build_source_client(config: &SourceConfig) -> Result<Client, BalizasError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language).map_err(|e| {
            BalizasError::Config(crate::ConfigError::Validation(format!(
                "invalid accept-language header: {}",
                e
            )))
        })?,
    );

    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches the listing markup at `url`
///
/// The body is decoded as UTF-8 regardless of the declared charset; the
/// source occasionally mislabels it.
///
/// # Returns
///
/// * `Ok(String)` - The page markup
/// * `Err(BalizasError::Timeout)` - The request exceeded the configured timeout
/// * `Err(BalizasError::Status)` - The source answered with a non-2xx status
/// * `Err(BalizasError::Http)` - Any other transport failure
pub async fn fetch_markup(client: &Client, url: &Url) -> Result<String, BalizasError> {
    tracing::debug!("Fetching incident listing: {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BalizasError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(|e| classify(url, e))?;
    tracing::debug!("Received {} bytes from {}", bytes.len(), url);

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn classify(url: &Url, error: reqwest::Error) -> BalizasError {
    if error.is_timeout() {
        BalizasError::Timeout {
            url: url.to_string(),
        }
    } else {
        BalizasError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
