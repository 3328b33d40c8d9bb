//! Configuration module for dgt-balizas
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use dgt_balizas::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("balizas.toml")).unwrap();
//! println!("Geocoding through: {}", config.geocoder.endpoint);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, GeocoderConfig, MapConfig, SourceConfig, DEFAULT_BROWSER_AGENT};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
