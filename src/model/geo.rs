/// Geocoding result types
///
/// A result only exists for a successful lookup; a miss is `None`, never a
/// zeroed coordinate.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative confidence attached to a geocoded coordinate
///
/// Variants are declared from least to most precise so that the derived
/// ordering reads `VeryHigh > High > Medium > Low > Estimated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrecisionLabel {
    /// Only the province could be matched
    Estimated,

    /// Road within the province, no marker
    Low,

    /// Marker without locality, or locality without road
    Medium,

    /// Road and locality, or road and marker within the province
    High,

    /// Road, marker, locality and province all matched
    VeryHigh,
}

impl PrecisionLabel {
    /// Returns the wire label (`very-high`, `high`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Estimated => "estimated",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very-high",
        }
    }
}

impl fmt::Display for PrecisionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one successful resolver cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Precision of the cascade level that matched
    pub precision_label: PrecisionLabel,

    /// The exact query string that produced the match
    pub source_query: String,
}
