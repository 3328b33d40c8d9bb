//! dgt-balizas: active road-beacon tracker for the DGT incident feed
//!
//! This crate scrapes the DGT (Dirección General de Tráfico) incident table,
//! keeps the "fixed obstacle" hazards, normalizes them into structured
//! records and resolves approximate coordinates through Nominatim.

pub mod config;
pub mod extract;
pub mod geocode;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod source;

use thiserror::Error;

/// Main error type for dgt-balizas operations
#[derive(Debug, Error)]
pub enum BalizasError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Upstream returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid pattern: {0}")]
    Pattern(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for dgt-balizas operations
pub type Result<T> = std::result::Result<T, BalizasError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{ExtractionReport, Extractor};
pub use geocode::{LocationQuery, Resolver};
pub use model::{Category, GeocodeResult, IncidentRecord, PrecisionLabel};
pub use pipeline::Pipeline;
