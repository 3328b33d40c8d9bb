//! Rendering of records for the command-line surface
//!
//! This module handles:
//! - The `{success, data|error}` JSON envelope
//! - Plain-text listings and record details
//! - Feed statistics
//! - The static Leaflet map page

mod envelope;
pub mod map;
pub mod stats;
mod text;

pub use envelope::Envelope;
pub use map::{generate_map_page, write_map_page};
pub use stats::{print_statistics, FeedStatistics};
pub use text::{format_record_detail, format_record_line};

use thiserror::Error;

/// Errors that can occur while rendering or writing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
