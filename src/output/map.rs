//! Static Leaflet map of located incidents
//!
//! The page is self-contained apart from the Leaflet assets and the tile
//! server. Records are embedded as a JSON data island; popups are built
//! with DOM text nodes so upstream text is never interpreted as markup.

use crate::config::MapConfig;
use crate::model::IncidentRecord;
use crate::output::{OutputError, OutputResult};
use serde::Serialize;
use std::fs;
use std::path::Path;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Balizas Activas - Mapa</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; }
.header { position: fixed; top: 0; left: 0; right: 0; height: 50px; z-index: 1000;
  display: flex; justify-content: space-between; align-items: center; padding: 0 20px;
  background: linear-gradient(135deg, #c0392b, #e74c3c); color: white; }
.header h1 { font-size: 18px; font-weight: 600; }
#map { margin-top: 50px; height: calc(100vh - 50px); width: 100%; }
.popup h3 { color: #c0392b; font-size: 14px; margin-bottom: 6px; }
.popup div { font-size: 13px; margin: 2px 0; }
.popup .precision { font-size: 11px; color: #888; margin-top: 6px; }
</style>
</head>
<body>
<div class="header"><h1>Balizas Activas DGT</h1><div id="stats"></div></div>
<div id="map"></div>
<script id="incidents" type="application/json">__INCIDENTS__</script>
<script>
const incidents = JSON.parse(document.getElementById('incidents').textContent);
const map = L.map('map').setView([__CENTER_LAT__, __CENTER_LON__], __ZOOM__);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors | Datos: DGT'
}).addTo(map);

function row(parent, label, value, className) {
  const el = document.createElement('div');
  if (className) el.className = className;
  el.textContent = label + (value === null || value === undefined || value === '' ? 'N/A' : value);
  parent.appendChild(el);
}

incidents.forEach(b => {
  const popup = document.createElement('div');
  popup.className = 'popup';
  const title = document.createElement('h3');
  title.textContent = b.label;
  popup.appendChild(title);
  row(popup, 'Carretera: ', b.road + ' km ' + (b.marker || 'N/A'));
  row(popup, 'Comunidad: ', b.region);
  row(popup, 'Provincia: ', b.province);
  row(popup, 'Población: ', b.locality);
  row(popup, 'Sentido: ', b.direction);
  row(popup, 'Inicio: ', b.start_date + ' ' + b.start_time);
  row(popup, 'Lat/Lon: ', b.latitude.toFixed(6) + ', ' + b.longitude.toFixed(6));
  row(popup, 'Precisión: ', b.precision_label, 'precision');
  L.marker([b.latitude, b.longitude]).bindPopup(popup).addTo(map);
});

document.getElementById('stats').textContent = incidents.length + ' balizas en el mapa';
</script>
</body>
</html>
"#;

/// What the page needs to know about one located record
#[derive(Debug, Serialize)]
struct MapPoint<'a> {
    id: &'a str,
    label: &'static str,
    road: &'a str,
    marker: Option<&'a str>,
    region: &'a str,
    province: &'a str,
    locality: Option<&'a str>,
    direction: Option<&'a str>,
    start_date: &'a str,
    start_time: &'a str,
    latitude: f64,
    longitude: f64,
    precision_label: &'static str,
}

impl<'a> MapPoint<'a> {
    fn from_record(record: &'a IncidentRecord) -> Option<Self> {
        let location = record.location.as_ref()?;
        Some(Self {
            id: &record.id,
            label: record.category.upstream_label(),
            road: &record.road,
            marker: record.marker.as_deref(),
            region: &record.region,
            province: &record.province,
            locality: record.locality.as_deref(),
            direction: record.direction.as_deref(),
            start_date: &record.start_date,
            start_time: &record.start_time,
            latitude: location.latitude,
            longitude: location.longitude,
            precision_label: location.precision_label.as_str(),
        })
    }
}

/// Renders the map page; records without coordinates are left out
pub fn generate_map_page(records: &[IncidentRecord], config: &MapConfig) -> OutputResult<String> {
    let points: Vec<MapPoint<'_>> = records.iter().filter_map(MapPoint::from_record).collect();
    let data = serde_json::to_string(&points)?;

    Ok(TEMPLATE
        .replace("__INCIDENTS__", &escape_script(&data))
        .replace("__CENTER_LAT__", &config.center[0].to_string())
        .replace("__CENTER_LON__", &config.center[1].to_string())
        .replace("__ZOOM__", &config.zoom.to_string()))
}

/// Renders the page and writes it to `path`, returning the number of markers
pub fn write_map_page(
    records: &[IncidentRecord],
    config: &MapConfig,
    path: &Path,
) -> OutputResult<usize> {
    let page = generate_map_page(records, config)?;
    fs::write(path, page)
        .map_err(|e| OutputError::Write(format!("{}: {}", path.display(), e)))?;

    let markers = records.iter().filter(|r| r.is_located()).count();
    tracing::info!("Wrote map with {} markers to {}", markers, path.display());
    Ok(markers)
}

/// Keeps embedded JSON from closing the surrounding script element
fn escape_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::tests::sample_record;
    use crate::model::{GeocodeResult, PrecisionLabel};

    fn located() -> IncidentRecord {
        let mut record = sample_record();
        record.attach_location(GeocodeResult {
            latitude: 40.5472,
            longitude: -3.642,
            precision_label: PrecisionLabel::High,
            source_query: "ALCOBENDAS, A-1, MADRID, España".to_string(),
        });
        record
    }

    fn data_island(page: &str) -> serde_json::Value {
        let start = page.find("application/json\">").unwrap() + "application/json\">".len();
        let end = start + page[start..].find("</script>").unwrap();
        serde_json::from_str(&page[start..end]).unwrap()
    }

    #[test]
    fn test_only_located_records_are_embedded() {
        let page = generate_map_page(&[located(), sample_record()], &MapConfig::default()).unwrap();
        let data = data_island(&page);

        assert_eq!(data.as_array().unwrap().len(), 1);
        assert_eq!(data[0]["precision_label"], "high");
        assert_eq!(data[0]["marker"], "23,5");
        assert!(page.contains("setView([40.4168, -3.7038], 6)"));
    }

    #[test]
    fn test_script_close_is_escaped() {
        let mut record = located();
        record.locality = Some("</script><script>alert(1)</script>".to_string());

        let page = generate_map_page(&[record], &MapConfig::default()).unwrap();
        assert_eq!(page.matches("</script>").count(), 3);

        let data = data_island(&page);
        assert_eq!(data[0]["locality"], "</script><script>alert(1)</script>");
    }

    #[test]
    fn test_write_map_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapa.html");

        let markers = write_map_page(&[located(), sample_record()], &MapConfig::default(), &path).unwrap();
        assert_eq!(markers, 1);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("<!DOCTYPE html>"));
    }
}
