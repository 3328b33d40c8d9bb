//! Per-field extractors
//!
//! Each extractor looks at one slice of a row and returns an `Option`; the
//! caller picks the default. None of them can fail the row.

use crate::extract::row::{preceded_by, Cell, Row};
use crate::BalizasError;
use regex::Regex;
use scraper::Selector;

/// Element selectors used by the extractors
#[derive(Debug)]
pub struct Selectors {
    pub row: Selector,
    pub cell: Selector,
    pub span: Selector,
    pub link: Selector,
    pub image: Selector,
    pub bold: Selector,
}

impl Selectors {
    pub fn new() -> Result<Self, BalizasError> {
        Ok(Self {
            row: parse_selector("tr")?,
            cell: parse_selector("td")?,
            span: parse_selector("span")?,
            link: parse_selector("a")?,
            image: parse_selector("img")?,
            bold: parse_selector("b")?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, BalizasError> {
    Selector::parse(selector)
        .map_err(|e| BalizasError::Pattern(format!("invalid selector '{}': {:?}", selector, e)))
}

/// Text patterns used by the extractors
#[derive(Debug)]
pub struct Patterns {
    onclick_code: Regex,
    alt_code: Regex,
    date: Regex,
    level_icon: Regex,
    marker: Regex,
    direction: Regex,
    whitespace: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self, BalizasError> {
        Ok(Self {
            onclick_code: compile(r"inciCodigo=(\d+)")?,
            alt_code: compile(r"/(\d+)$")?,
            date: compile(r"\d{2}/\d{2}/\d{4}")?,
            level_icon: compile(r"nivel_(\w+)\.gif")?,
            marker: compile(r"(?i)km\s*([\d.,]+)")?,
            direction: compile(r"(?i)sentido\s+(\w+)")?,
            whitespace: compile(r"\s+")?,
        })
    }

    /// Collapses whitespace runs to single spaces and trims
    pub fn normalize_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex, BalizasError> {
    Regex::new(pattern)
        .map_err(|e| BalizasError::Pattern(format!("invalid regex '{}': {}", pattern, e)))
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Upstream incident code, from a link handler or else an image alt text
pub fn incident_id(row: &Row<'_>, selectors: &Selectors, patterns: &Patterns) -> Option<String> {
    row.attrs(&selectors.link, "onclick")
        .find_map(|onclick| first_capture(&patterns.onclick_code, onclick))
        .or_else(|| {
            row.attrs(&selectors.image, "alt")
                .find_map(|alt| first_capture(&patterns.alt_code, alt))
        })
}

/// Start `(date, hour)`: the date is the link text, the hour the span text
pub fn start_stamp(cell: &Cell<'_>, selectors: &Selectors) -> (Option<String>, Option<String>) {
    let date = cell.first_text(&selectors.link).and_then(non_empty);
    let hour = cell.first_text(&selectors.span).and_then(non_empty);
    (date, hour)
}

/// End `(date, hour)`, present only when both the hour span and a date exist
pub fn end_stamp(
    cell: &Cell<'_>,
    selectors: &Selectors,
    patterns: &Patterns,
) -> Option<(String, String)> {
    let hour = cell.first_text(&selectors.span).and_then(non_empty)?;
    let text = cell.text();
    let date = patterns.date.find(&text)?.as_str().to_string();
    Some((date, hour))
}

/// Severity label from the `nivel_<label>.gif` icon
pub fn severity_level(cell: &Cell<'_>, selectors: &Selectors, patterns: &Patterns) -> Option<String> {
    let src = cell.first_attr(&selectors.image, "src")?;
    first_capture(&patterns.level_icon, src)
}

/// `(province, locality)`: bold text is the province, the rest the locality
///
/// The locality is the cell text with every occurrence of the province
/// removed, so a locality that contains the province name loses that part.
pub fn province_and_locality(cell: &Cell<'_>, selectors: &Selectors) -> (String, Option<String>) {
    let province = cell.first_text(&selectors.bold).unwrap_or_default();
    let full_text = cell.text();
    let full_text = full_text.trim();

    let locality = if !province.is_empty() && full_text.contains(&province) {
        non_empty(full_text.replace(&province, "").trim().to_string())
    } else {
        None
    };

    (province, locality)
}

/// Road designation, the bold text of its cell
pub fn road(cell: &Cell<'_>, selectors: &Selectors) -> Option<String> {
    cell.first_text(&selectors.bold).and_then(non_empty)
}

/// Kilometer marker from the description, as scraped
///
/// Sentence punctuation trailing the number is dropped. A capture made only
/// of separators ("2 km, en el km 45") is passed over for the next one.
pub fn marker(description: &str, patterns: &Patterns) -> Option<String> {
    patterns
        .marker
        .captures_iter(description)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches(&['.', ','][..]))
        .find(|value| value.chars().any(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

/// Direction of travel, from "sentido X" or a bold span right after "sentido"
pub fn direction(
    description: &str,
    cell: &Cell<'_>,
    selectors: &Selectors,
    patterns: &Patterns,
) -> Option<String> {
    first_capture(&patterns.direction, description).or_else(|| {
        cell.select(&selectors.bold)
            .find(|bold| preceded_by(bold, "sentido"))
            .map(|bold| bold.text().collect::<String>().trim().to_string())
            .and_then(non_empty)
    })
}
