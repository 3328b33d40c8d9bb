use crate::config::types::{Config, GeocoderConfig, MapConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Nominatim's usage policy caps clients at one request per second
const MIN_GEOCODER_INTERVAL_MS: u64 = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_geocoder_config(&config.geocoder)?;
    validate_map_config(&config.map)?;
    Ok(())
}

/// Validates the incident source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("source.base-url", &config.base_url)?;

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "source.timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "source.user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the geocoder configuration
fn validate_geocoder_config(config: &GeocoderConfig) -> Result<(), ConfigError> {
    validate_http_url("geocoder.endpoint", &config.endpoint)?;

    if config.min_interval_ms < MIN_GEOCODER_INTERVAL_MS {
        return Err(ConfigError::Validation(format!(
            "geocoder.min-interval-ms must be >= {}ms, got {}ms",
            MIN_GEOCODER_INTERVAL_MS, config.min_interval_ms
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "geocoder.timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.country_code.len() != 2 || !config.country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::Validation(format!(
            "geocoder.country-code must be a two-letter ISO code, got '{}'",
            config.country_code
        )));
    }

    // Validate client name: non-empty, alphanumeric + hyphens only
    if config.client_name.is_empty()
        || !config
            .client_name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "geocoder.client-name must be non-empty alphanumeric/hyphens, got '{}'",
            config.client_name
        )));
    }

    validate_http_url("geocoder.contact-url", &config.contact_url)?;
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates the map page configuration
fn validate_map_config(config: &MapConfig) -> Result<(), ConfigError> {
    if config.output_path.is_empty() {
        return Err(ConfigError::Validation(
            "map.output-path cannot be empty".to_string(),
        ));
    }

    let [lat, lon] = config.center;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(ConfigError::Validation(format!(
            "map.center out of range: [{}, {}]",
            lat, lon
        )));
    }

    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", key, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            key, value
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
