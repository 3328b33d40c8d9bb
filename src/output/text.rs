//! Plain-text rendering of incident records

use crate::model::IncidentRecord;

const MISSING: &str = "-";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One summary line per record, for listings
pub fn format_record_line(record: &IncidentRecord) -> String {
    let id = if record.id.is_empty() {
        MISSING
    } else {
        record.id.as_str()
    };
    let status = if record.is_active { "ACTIVE" } else { "ended" };

    format!(
        "{:<9} {:<6} {} {:<5}  {:<10} km {:<8} {} ({}){}",
        id,
        status,
        record.start_date,
        record.start_time,
        record.road,
        record.marker.as_deref().unwrap_or(MISSING),
        record.province,
        record.region,
        match record.category {
            crate::model::Category::ObstacleFromAccident => "  [accident]",
            crate::model::Category::PlainObstacle => "",
        }
    )
}

/// Multi-line detail view of one record
///
/// Timestamps are shown in ISO order when the upstream text parses; the
/// scraped text is shown as is otherwise.
pub fn format_record_detail(record: &IncidentRecord) -> String {
    let opt = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING.to_string());
    let mut out = String::new();

    out.push_str(&format!("Incident {}\n", record.id));
    out.push_str(&format!("  Type:       {}\n", record.category.upstream_label()));
    out.push_str(&format!("  Severity:   {}\n", record.severity_level));
    out.push_str(&format!("  Road:       {}\n", record.road));
    out.push_str(&format!("  Marker:     {}\n", opt(&record.marker)));
    out.push_str(&format!("  Direction:  {}\n", opt(&record.direction)));
    out.push_str(&format!("  Province:   {}\n", record.province));
    out.push_str(&format!("  Locality:   {}\n", opt(&record.locality)));
    out.push_str(&format!("  Region:     {}\n", record.region));

    let started = record.started_at();
    let started_text = match started {
        Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
        None => format!("{} {}", record.start_date, record.start_time),
    };
    out.push_str(&format!("  Started:    {}\n", started_text));

    match (&record.end_date, &record.end_time) {
        (Some(date), Some(time)) => {
            let ended = record.ended_at();
            let ended_text = match ended {
                Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
                None => format!("{} {}", date, time),
            };
            out.push_str(&format!("  Ended:      {}\n", ended_text));

            if let (Some(start), Some(end)) = (started, ended) {
                let minutes = (end - start).num_minutes().max(0);
                out.push_str(&format!(
                    "  Duration:   {}h {:02}m\n",
                    minutes / 60,
                    minutes % 60
                ));
            }
        }
        _ => out.push_str("  Ended:      still active\n"),
    }

    if let Some(location) = &record.location {
        out.push_str(&format!(
            "  Location:   {:.6}, {:.6} ({})\n",
            location.latitude, location.longitude, location.precision_label
        ));
        out.push_str(&format!("  Matched:    {}\n", location.source_query));
    }
    out.push_str(&format!("  Text:       {}\n", record.raw_description));
    out
}
