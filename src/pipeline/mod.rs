//! Pipeline coordinator
//!
//! Wires the query builder, the HTTP fetch and the extractor into one
//! `fetch` call, and offers the collection helpers the consumer surface
//! needs (filtering, lookup by id, lazy geocoding).

use crate::config::Config;
use crate::extract::{ExtractionReport, Extractor};
use crate::geocode::{LocationQuery, Resolver};
use crate::model::{Category, IncidentRecord};
use crate::source::{build_source_client, fetch_markup, QueryBuilder};
use crate::BalizasError;
use reqwest::Client;

/// Fetches and extracts the incident listing
pub struct Pipeline {
    client: Client,
    query: QueryBuilder,
    extractor: Extractor,
}

impl Pipeline {
    /// Creates a pipeline from the source section of `config`
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - HTTP client, URL builder and extractor are ready
    /// * `Err(BalizasError)` - The base URL or a client setting was invalid
    pub fn new(config: &Config) -> Result<Self, BalizasError> {
        Ok(Self {
            client: build_source_client(&config.source)?,
            query: QueryBuilder::new(&config.source.base_url)?,
            extractor: Extractor::new()?,
        })
    }

    /// Fetches the listing and returns the full extraction report
    pub async fn fetch_report(
        &self,
        region: Option<&str>,
        province: Option<&str>,
    ) -> Result<ExtractionReport, BalizasError> {
        let url = self.query.build_url(region, province);
        let markup = fetch_markup(&self.client, &url).await?;
        let report = self.extractor.extract(&markup);

        tracing::info!(
            "Fetched {} incidents ({} rows skipped)",
            report.records.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Fetches the listing and returns the records in page order
    pub async fn fetch(
        &self,
        region: Option<&str>,
        province: Option<&str>,
    ) -> Result<Vec<IncidentRecord>, BalizasError> {
        Ok(self.fetch_report(region, province).await?.into_records())
    }
}

/// Records without an end timestamp, order preserved
pub fn filter_active(records: &[IncidentRecord]) -> Vec<IncidentRecord> {
    records.iter().filter(|r| r.is_active).cloned().collect()
}

pub fn filter_category(records: &[IncidentRecord], category: Category) -> Vec<IncidentRecord> {
    records
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect()
}

/// First record with the given upstream id
pub fn find_by_id<'a>(records: &'a [IncidentRecord], id: &str) -> Option<&'a IncidentRecord> {
    if id.is_empty() {
        return None;
    }
    records.iter().find(|r| r.id == id)
}

/// Geocodes one record in place unless it already carries a location
///
/// Returns whether the record ends up with coordinates.
pub async fn locate(record: &mut IncidentRecord, resolver: &mut Resolver) -> bool {
    if record.is_located() {
        return true;
    }

    let query = LocationQuery::from(&*record);
    match resolver.resolve(&query).await {
        Some(result) => {
            record.attach_location(result);
            true
        }
        None => false,
    }
}

/// Outcome of a bounded geocoding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocateSummary {
    /// Records passed to the resolver
    pub attempted: usize,
    pub located: usize,
    /// Records that already had coordinates
    pub already_located: usize,
    /// Records left out because the limit was reached
    pub deferred: usize,
}

/// Geocodes at most `limit` records that do not yet carry coordinates
///
/// Each resolver call may cost several rate-limited requests, so the limit
/// bounds the latency of one pass. Records past the limit are untouched.
pub async fn locate_batch(
    records: &mut [IncidentRecord],
    resolver: &mut Resolver,
    limit: usize,
) -> LocateSummary {
    let mut summary = LocateSummary::default();

    for record in records.iter_mut() {
        if record.is_located() {
            summary.already_located += 1;
            continue;
        }
        if summary.attempted >= limit {
            summary.deferred += 1;
            continue;
        }

        summary.attempted += 1;
        if locate(record, resolver).await {
            summary.located += 1;
        }
    }

    if summary.deferred > 0 {
        tracing::info!(
            "Geocoding limit of {} reached, {} records left without coordinates",
            limit,
            summary.deferred
        );
    }
    summary
}
