use crate::model::GeocodeResult;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Sentinel for fields that could not be derived (region, severity level)
pub const UNKNOWN: &str = "unknown";

/// Upper-case marker that turns a plain obstacle into an accident-caused one
const ACCIDENT_MARKER: &str = "ACCIDENTE";

/// The two kinds of fixed obstacle the feed distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// "OBSTÁCULO FIJO"
    PlainObstacle,

    /// "OBSTÁCULO FIJO POR ACCIDENTE"
    ObstacleFromAccident,
}

impl Category {
    /// Classifies a whitespace-normalized description
    ///
    /// The accident marker alone decides the category; the coarse row filter
    /// has already guaranteed this is a fixed obstacle.
    pub fn from_description(description: &str) -> Self {
        if description.to_uppercase().contains(ACCIDENT_MARKER) {
            Self::ObstacleFromAccident
        } else {
            Self::PlainObstacle
        }
    }

    /// Label as published by the upstream source
    pub fn upstream_label(&self) -> &'static str {
        match self {
            Self::PlainObstacle => "OBSTÁCULO FIJO",
            Self::ObstacleFromAccident => "OBSTÁCULO FIJO POR ACCIDENTE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainObstacle => f.write_str("plain-obstacle"),
            Self::ObstacleFromAccident => f.write_str("obstacle-from-accident"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "fijo" | "plain-obstacle" => Ok(Self::PlainObstacle),
            "accident" | "accidente" | "obstacle-from-accident" => {
                Ok(Self::ObstacleFromAccident)
            }
            other => Err(format!(
                "unknown category '{}', expected 'accident' or 'plain'",
                other
            )),
        }
    }
}

/// One fixed-obstacle row of the incident table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentRecord {
    /// Upstream `inciCodigo`; empty when it could not be recovered
    pub id: String,
    pub category: Category,
    pub start_date: String,
    pub start_time: String,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    /// Label taken from the level icon filename, or [`UNKNOWN`]
    pub severity_level: String,
    /// Autonomous community derived from `province`, or [`UNKNOWN`]
    pub region: String,
    pub province: String,
    pub locality: Option<String>,
    pub road: String,
    /// Kilometer marker exactly as scraped (decimal comma preserved)
    pub marker: Option<String>,
    pub direction: Option<String>,
    pub raw_description: String,
    /// Always `end_date.is_none()`
    pub is_active: bool,
    #[serde(flatten)]
    pub location: Option<GeocodeResult>,
}

impl IncidentRecord {
    /// Attaches a geocoding result, replacing any previous one
    pub fn attach_location(&mut self, result: GeocodeResult) {
        self.location = Some(result);
    }

    /// Whether coordinates have been resolved for this record
    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }

    /// Parses the upstream `dd/mm/yyyy` date and `HH:MM` hour
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.start_date, &self.start_time)
    }

    /// Parses the end timestamp, if the incident has finished
    pub fn ended_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.end_date.as_deref()?, self.end_time.as_deref()?)
    }
}

fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .ok()?;
    Some(date.and_time(time))
}
