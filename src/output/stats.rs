//! Statistics over one fetched listing

use crate::extract::ExtractionReport;
use crate::model::{Category, IncidentRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts for one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedStatistics {
    /// Records extracted
    pub total: usize,
    pub active: usize,
    pub finished: usize,
    pub from_accident: usize,
    pub plain: usize,
    /// Rows scanned in the document
    pub rows_scanned: usize,
    /// Candidate rows that could not be turned into records
    pub skipped_rows: usize,
    /// Active records per region
    pub active_by_region: BTreeMap<String, usize>,
    /// Active records per severity label
    pub active_by_severity: BTreeMap<String, usize>,
}

impl FeedStatistics {
    pub fn from_records(records: &[IncidentRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            match record.category {
                Category::ObstacleFromAccident => stats.from_accident += 1,
                Category::PlainObstacle => stats.plain += 1,
            }

            if record.is_active {
                stats.active += 1;
                *stats
                    .active_by_region
                    .entry(record.region.clone())
                    .or_insert(0) += 1;
                *stats
                    .active_by_severity
                    .entry(record.severity_level.clone())
                    .or_insert(0) += 1;
            } else {
                stats.finished += 1;
            }
        }

        stats
    }

    pub fn from_report(report: &ExtractionReport) -> Self {
        Self {
            rows_scanned: report.rows_scanned,
            skipped_rows: report.skipped.len(),
            ..Self::from_records(&report.records)
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &FeedStatistics) {
    println!("=== Fixed Obstacle Statistics ===\n");

    println!("Overview:");
    println!("  Incidents: {}", stats.total);
    println!("  Active: {}", stats.active);
    println!("  Finished: {}", stats.finished);
    println!("  Caused by accident: {}", stats.from_accident);
    println!("  Plain obstacles: {}", stats.plain);
    println!(
        "  Rows scanned: {} ({} skipped)",
        stats.rows_scanned, stats.skipped_rows
    );
    println!();

    if !stats.active_by_region.is_empty() {
        println!("Active by Region:");
        let mut regions: Vec<_> = stats.active_by_region.iter().collect();
        regions.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (region, count) in regions {
            let percentage = if stats.active > 0 {
                (*count as f64 / stats.active as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", region, count, percentage);
        }
        println!();
    }

    if !stats.active_by_severity.is_empty() {
        println!("Active by Severity:");
        for (level, count) in &stats.active_by_severity {
            println!("  {}: {}", level, count);
        }
    }
}
