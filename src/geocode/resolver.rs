//! Cascading, memoized, throttled location resolver

use crate::config::GeocoderConfig;
use crate::geocode::cascade::{candidate_queries, LocationQuery};
use crate::geocode::nominatim::{Coordinates, NominatimClient};
use crate::geocode::throttle::Throttle;
use crate::model::GeocodeResult;
use crate::BalizasError;
use std::collections::HashMap;
use std::time::Duration;

/// Counters for one resolver's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Query strings looked up, memoized or not
    pub lookups: usize,
    pub memo_hits: usize,
    /// Requests actually sent to the geocoder
    pub requests: usize,
    /// Requests that failed in transport or parsing
    pub failures: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

/// Turns partial location descriptions into approximate coordinates
///
/// The resolver owns its memo and its rate limiter, so every request made
/// through one instance is spaced by at least the configured interval.
/// Methods take `&mut self`; sharing a resolver across tasks means wrapping
/// it in a mutex, which keeps the spacing intact.
#[derive(Debug)]
pub struct Resolver {
    client: NominatimClient,
    throttle: Throttle,
    memo: HashMap<String, Option<Coordinates>>,
    country_name: String,
    stats: ResolverStats,
}

impl Resolver {
    pub fn new(config: &GeocoderConfig) -> Result<Self, BalizasError> {
        Ok(Self {
            client: NominatimClient::new(config)?,
            throttle: Throttle::new(Duration::from_millis(config.min_interval_ms)),
            memo: HashMap::new(),
            country_name: config.country_name.clone(),
            stats: ResolverStats::default(),
        })
    }

    /// Walks the cascade and returns the first hit with its precision
    ///
    /// Returns None when every formulation came back empty or failed.
    pub async fn resolve(&mut self, location: &LocationQuery) -> Option<GeocodeResult> {
        let candidates = candidate_queries(location, &self.country_name);
        if candidates.is_empty() {
            tracing::debug!("Nothing to geocode for {:?}", location);
        }

        for candidate in candidates {
            if let Some(point) = self.lookup(&candidate.query).await {
                tracing::debug!(
                    "Resolved '{}' ({}) -> {:.5}, {:.5}",
                    candidate.query,
                    candidate.precision,
                    point.latitude,
                    point.longitude
                );
                self.stats.resolved += 1;
                return Some(GeocodeResult {
                    latitude: point.latitude,
                    longitude: point.longitude,
                    precision_label: candidate.precision,
                    source_query: candidate.query,
                });
            }
        }

        tracing::info!(
            "No coordinates for road '{}' in '{}'",
            location.road,
            location.province
        );
        self.stats.unresolved += 1;
        None
    }

    /// Looks up one query string, consulting the memo first
    ///
    /// Definitive answers (a hit or no match) are memoized. Transport
    /// failures are logged and not memoized, so a later call retries.
    pub async fn lookup(&mut self, query: &str) -> Option<Coordinates> {
        self.stats.lookups += 1;

        if let Some(cached) = self.memo.get(query) {
            self.stats.memo_hits += 1;
            tracing::trace!("Memo hit for '{}'", query);
            return *cached;
        }

        self.throttle.wait().await;
        self.stats.requests += 1;
        tracing::debug!("Geocoding '{}'", query);

        match self.client.search(query).await {
            Ok(found) => {
                self.memo.insert(query.to_string(), found);
                found
            }
            Err(e) => {
                self.stats.failures += 1;
                tracing::warn!("Geocoding '{}' failed: {}", query, e);
                None
            }
        }
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Number of memoized query strings
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_memoized(&self, query: &str) -> bool {
        self.memo.contains_key(query)
    }

    /// Forgets every memoized answer; counters are kept
    pub fn clear_memo(&mut self) {
        tracing::debug!("Clearing {} memoized geocoder answers", self.memo.len());
        self.memo.clear();
    }
}
