//! Approximate geocoding of incident locations
//!
//! A location is turned into up to seven query strings, tried from most to
//! least specific against a Nominatim endpoint. The first hit wins and
//! carries the precision label of the formulation that produced it.

mod cascade;
mod nominatim;
mod resolver;
mod throttle;

pub use cascade::{candidate_queries, clean_locality, normalize_marker, Candidate, LocationQuery};
pub use nominatim::{parse_response, Coordinates, NominatimClient};
pub use resolver::{Resolver, ResolverStats};
pub use throttle::Throttle;

use thiserror::Error;

/// Failure of a single geocoder request
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoder returned HTTP {0}")]
    Status(u16),

    #[error("Geocoder rate limit exceeded")]
    RateLimited,

    #[error("Parse error: {message}")]
    Parse { message: String },
}
