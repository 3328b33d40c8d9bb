//! Candidate query formulations, from most to least specific

use crate::model::{IncidentRecord, PrecisionLabel, UNKNOWN};

/// Partial location description handed to the resolver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationQuery {
    pub road: String,
    /// Kilometer marker, decimal comma or dot
    pub marker: String,
    pub province: String,
    pub locality: Option<String>,
    pub region: Option<String>,
}

impl LocationQuery {
    pub fn new(road: impl Into<String>, marker: impl Into<String>, province: impl Into<String>) -> Self {
        Self {
            road: road.into(),
            marker: marker.into(),
            province: province.into(),
            locality: None,
            region: None,
        }
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl From<&IncidentRecord> for LocationQuery {
    fn from(record: &IncidentRecord) -> Self {
        Self {
            road: record.road.clone(),
            marker: record.marker.clone().unwrap_or_default(),
            province: record.province.clone(),
            locality: record.locality.clone(),
            region: Some(record.region.clone()),
        }
    }
}

/// One query string of the cascade and the precision it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub query: String,
    pub precision: PrecisionLabel,
}

/// Converts decimal commas to dots; already-normalized markers are unchanged
pub fn normalize_marker(marker: &str) -> String {
    marker.trim().replace(',', ".")
}

/// Drops a trailing parenthetical qualifier: `OUTEIRO (O)` -> `OUTEIRO`
pub fn clean_locality(locality: &str) -> String {
    locality
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Joins the non-empty parts with `", "`
fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the ordered cascade for `location`
///
/// A formulation is included only when the fields it needs are present.
/// The last one (province alone, or the region when the province is
/// missing) is always included if there is any area to name.
pub fn candidate_queries(location: &LocationQuery, country: &str) -> Vec<Candidate> {
    let road = location.road.trim();
    let marker = normalize_marker(&location.marker);
    let province = location.province.trim();
    let locality = location
        .locality
        .as_deref()
        .map(clean_locality)
        .unwrap_or_default();

    let has_road = !road.is_empty();
    let has_marker = !marker.is_empty();
    let has_locality = !locality.is_empty();

    let mut candidates = Vec::with_capacity(7);
    let mut push = |query: String, precision: PrecisionLabel| {
        candidates.push(Candidate { query, precision });
    };

    if has_road && has_marker && has_locality {
        push(
            join(&[
                format!("{} km {}", road, marker).as_str(),
                locality.as_str(),
                province,
                country,
            ]),
            PrecisionLabel::VeryHigh,
        );
    }

    if has_locality && has_road {
        push(join(&[locality.as_str(), road, province, country]), PrecisionLabel::High);
    }

    if has_road && has_marker {
        push(
            join(&[format!("{} kilómetro {}", road, marker).as_str(), province, country]),
            PrecisionLabel::High,
        );
        push(
            join(&[format!("{} km {}", road, marker).as_str(), country]),
            PrecisionLabel::Medium,
        );
    }

    if has_locality {
        push(join(&[locality.as_str(), province, country]), PrecisionLabel::Medium);
    }

    if has_road {
        push(
            join(&[format!("carretera {}", road).as_str(), province, country]),
            PrecisionLabel::Low,
        );
    }

    let area = if province.is_empty() {
        location
            .region
            .as_deref()
            .map(str::trim)
            .filter(|region| !region.is_empty() && *region != UNKNOWN)
            .unwrap_or_default()
    } else {
        province
    };
    if !area.is_empty() {
        push(join(&[area, country]), PrecisionLabel::Estimated);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queries(location: &LocationQuery) -> Vec<(String, PrecisionLabel)> {
        candidate_queries(location, "España")
            .into_iter()
            .map(|c| (c.query, c.precision))
            .collect()
    }

    #[test]
    fn test_full_cascade_order() {
        let location = LocationQuery::new("A-1", "23", "MADRID").with_locality("Alcobendas");
        let expected = vec![
            ("A-1 km 23, Alcobendas, MADRID, España", PrecisionLabel::VeryHigh),
            ("Alcobendas, A-1, MADRID, España", PrecisionLabel::High),
            ("A-1 kilómetro 23, MADRID, España", PrecisionLabel::High),
            ("A-1 km 23, España", PrecisionLabel::Medium),
            ("Alcobendas, MADRID, España", PrecisionLabel::Medium),
            ("carretera A-1, MADRID, España", PrecisionLabel::Low),
            ("MADRID, España", PrecisionLabel::Estimated),
        ];
        let expected: Vec<(String, PrecisionLabel)> = expected
            .into_iter()
            .map(|(q, p)| (q.to_string(), p))
            .collect();
        assert_eq!(queries(&location), expected);
    }

    #[test]
    fn test_marker_is_normalized_in_queries() {
        let location = LocationQuery::new("M-50", "15,3", "MADRID");
        let all = queries(&location);
        assert_eq!(all[0].0, "M-50 kilómetro 15.3, MADRID, España");
        assert!(all.iter().all(|(q, _)| !q.contains("15,3")));
    }

    #[test]
    fn test_without_marker_or_locality() {
        let location = LocationQuery::new("N-VI", "", "LUGO");
        let all = queries(&location);
        assert_eq!(
            all,
            vec![
                ("carretera N-VI, LUGO, España".to_string(), PrecisionLabel::Low),
                ("LUGO, España".to_string(), PrecisionLabel::Estimated),
            ]
        );
    }

    #[test]
    fn test_locality_qualifier_is_stripped() {
        let location = LocationQuery::new("", "", "LUGO").with_locality("OUTEIRO (O)");
        let all = queries(&location);
        assert_eq!(all[0].0, "OUTEIRO, LUGO, España");
    }

    #[test]
    fn test_region_fallback_without_province() {
        let location = LocationQuery::new("", "", "").with_region("GALICIA");
        assert_eq!(
            queries(&location),
            vec![("GALICIA, España".to_string(), PrecisionLabel::Estimated)]
        );

        let unknown = LocationQuery::new("", "", "").with_region(UNKNOWN);
        assert!(queries(&unknown).is_empty());
    }

    #[test]
    fn test_normalize_marker_idempotent() {
        for marker in ["23,5", "23.5", "1.259", "342,55", "7", ""] {
            let once = normalize_marker(marker);
            assert_eq!(normalize_marker(&once), once);
        }
        assert_eq!(normalize_marker("23.5"), "23.5");
    }

    #[test]
    fn test_clean_locality() {
        assert_eq!(clean_locality("OUTEIRO (O)"), "OUTEIRO");
        assert_eq!(clean_locality("ALCOBENDAS"), "ALCOBENDAS");
        assert_eq!(clean_locality("(SIN NOMBRE)"), "");
    }
}
