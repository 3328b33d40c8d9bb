//! Record extraction from the incident listing markup
//!
//! The listing has no stable schema. Rows are picked by the text they
//! contain and fields are read by column position and styling:
//!
//! | Cell | Content |
//! |------|---------|
//! | 0 | start hour (`<span>`) and date (`<a>`) |
//! | 1 | end hour (`<span>`) and date, empty while active |
//! | 2 | level icon (`nivel_<label>.gif`) |
//! | 3 | province (`<b>`) followed by locality |
//! | 4 | road (`<b>`) |
//! | 5 | free-text description (marker, direction, accident) |
//!
//! A row that does not fit is reported as skipped; it never aborts the
//! extraction of the other rows.

mod fields;
mod row;

pub use row::{Cell, Row};

use crate::model::{Category, IncidentRecord, UNKNOWN};
use crate::source::region_for_province;
use crate::BalizasError;
use fields::{Patterns, Selectors};
use scraper::Html;
use std::fmt;

/// Phrase (upper-case) that marks a fixed-obstacle row
pub const TARGET_PHRASE: &str = "OBSTÁCULO FIJO";

/// Minimum number of data cells an incident row must carry
pub const MIN_CELLS: usize = 6;

/// Why a candidate row produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The row has fewer than [`MIN_CELLS`] cells
    TooFewCells { found: usize },

    /// The row wraps another table; its inner rows are scanned on their own
    NestedTable,
}

impl SkipReason {
    /// Layout wrappers repeat the phrase of the rows they hold, so skipping
    /// them loses nothing
    pub fn is_layout(&self) -> bool {
        matches!(self, Self::NestedTable)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewCells { found } => {
                write!(f, "too-few-cells (found {}, need {})", found, MIN_CELLS)
            }
            Self::NestedTable => f.write_str("nested-table"),
        }
    }
}

/// Outcome of extracting one candidate row
#[derive(Debug, Clone)]
pub enum RowOutcome {
    Parsed(IncidentRecord),
    Skipped(SkipReason),
}

/// A candidate row that was dropped, with its position in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Index among all `<tr>` elements of the document
    pub row_index: usize,
    pub reason: SkipReason,
}

/// Everything one extraction pass produced
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Records in document order
    pub records: Vec<IncidentRecord>,

    /// Candidate rows that produced no record
    pub skipped: Vec<SkippedRow>,

    /// Total `<tr>` elements seen
    pub rows_scanned: usize,

    /// Rows containing the target phrase
    pub candidate_rows: usize,
}

impl ExtractionReport {
    pub fn into_records(self) -> Vec<IncidentRecord> {
        self.records
    }
}

/// Turns incident listing markup into [`IncidentRecord`]s
#[derive(Debug)]
pub struct Extractor {
    selectors: Selectors,
    patterns: Patterns,
}

impl Extractor {
    /// Compiles the selectors and patterns
    ///
    /// # Errors
    ///
    /// Returns [`BalizasError::Pattern`] if a built-in selector or regex fails
    /// to compile.
    pub fn new() -> Result<Self, BalizasError> {
        Ok(Self {
            selectors: Selectors::new()?,
            patterns: Patterns::new()?,
        })
    }

    /// Extracts every fixed-obstacle row of `markup`
    ///
    /// Markup without matching rows yields an empty report.
    ///
    /// # Example
    ///
    /// ```
    /// use dgt_balizas::extract::Extractor;
    ///
    /// let extractor = Extractor::new().unwrap();
    /// let report = extractor.extract("<html><body><p>Sin incidencias</p></body></html>");
    /// assert!(report.records.is_empty());
    /// ```
    pub fn extract(&self, markup: &str) -> ExtractionReport {
        let document = Html::parse_document(markup);
        let mut report = ExtractionReport::default();

        for (row_index, element) in document.select(&self.selectors.row).enumerate() {
            report.rows_scanned += 1;

            let row = Row::new(element, &self.selectors.cell);
            if !row.text().to_uppercase().contains(TARGET_PHRASE) {
                continue;
            }
            report.candidate_rows += 1;

            match self.extract_row(&row) {
                RowOutcome::Parsed(record) => report.records.push(record),
                RowOutcome::Skipped(reason) => {
                    if reason.is_layout() {
                        tracing::debug!("Skipping incident row {}: {}", row_index, reason);
                    } else {
                        tracing::warn!("Skipping incident row {}: {}", row_index, reason);
                    }
                    report.skipped.push(SkippedRow { row_index, reason });
                }
            }
        }

        tracing::debug!(
            "Extracted {} records from {} candidate rows ({} skipped, {} rows scanned)",
            report.records.len(),
            report.candidate_rows,
            report.skipped.len(),
            report.rows_scanned
        );

        report
    }

    /// Extracts records only, discarding skip information
    pub fn extract_records(&self, markup: &str) -> Vec<IncidentRecord> {
        self.extract(markup).into_records()
    }

    /// Builds a record from one candidate row
    pub fn extract_row(&self, row: &Row<'_>) -> RowOutcome {
        let (s, p) = (&self.selectors, &self.patterns);

        if row.contains_nested_row(&s.row) {
            return RowOutcome::Skipped(SkipReason::NestedTable);
        }

        let cells = row.cells();
        if cells.len() < MIN_CELLS {
            return RowOutcome::Skipped(SkipReason::TooFewCells { found: cells.len() });
        }

        let id = fields::incident_id(row, s, p).unwrap_or_default();
        let (start_date, start_time) = fields::start_stamp(&cells[0], s);
        let (end_date, end_time) = match fields::end_stamp(&cells[1], s, p) {
            Some((date, hour)) => (Some(date), Some(hour)),
            None => (None, None),
        };
        let severity_level =
            fields::severity_level(&cells[2], s, p).unwrap_or_else(|| UNKNOWN.to_string());
        let (province, locality) = fields::province_and_locality(&cells[3], s);
        let road = fields::road(&cells[4], s).unwrap_or_default();

        let raw_description = p.normalize_whitespace(&cells[5].text());
        let marker = fields::marker(&raw_description, p);
        let direction = fields::direction(&raw_description, &cells[5], s, p);
        let category = Category::from_description(&raw_description);
        let region = region_for_province(&province).to_string();

        RowOutcome::Parsed(IncidentRecord {
            id,
            category,
            start_date: start_date.unwrap_or_default(),
            start_time: start_time.unwrap_or_default(),
            is_active: end_date.is_none(),
            end_date,
            end_time,
            severity_level,
            region,
            province,
            locality,
            road,
            marker,
            direction,
            raw_description,
            location: None,
        })
    }
}
