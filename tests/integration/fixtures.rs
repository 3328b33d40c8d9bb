//! Shared test configuration and markup

use dgt_balizas::config::{Config, GeocoderConfig, SourceConfig};
use wiremock::MockServer;

pub const LISTING_PATH: &str = "/etraffic/Incidencias";

/// Source configuration pointing at the mock server
pub fn source_config(server: &MockServer, timeout_secs: u64) -> Config {
    Config {
        source: SourceConfig {
            base_url: format!("{}{}", server.uri(), LISTING_PATH),
            timeout_secs,
            ..SourceConfig::default()
        },
        ..Config::default()
    }
}

/// Geocoder configuration pointing at the mock server
pub fn geocoder_config(server: &MockServer, min_interval_ms: u64) -> GeocoderConfig {
    GeocoderConfig {
        endpoint: format!("{}/search", server.uri()),
        min_interval_ms,
        timeout_secs: 5,
        ..GeocoderConfig::default()
    }
}

/// A listing page with one active and one finished obstacle, plus noise
pub fn listing_page() -> String {
    r##"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Incidencias</title></head>
<body>
<table class="incidencias">
  <tbody>
    <tr><th>Inicio</th><th>Fin</th><th>Nivel</th><th>Provincia</th><th>Carretera</th><th>Descripción</th></tr>
    <tr>
      <td><a href="#" onclick="verDetalle('inciCodigo=987654')">01/01/2024</a> <span>08:15</span></td>
      <td><span></span></td>
      <td><img src="/etraffic/img/nivel_amarillo.gif" alt="Nivel/987654"></td>
      <td><b>MADRID</b><br>ALCOBENDAS</td>
      <td><b>A-1</b></td>
      <td>OBSTÁCULO FIJO km 23,5 sentido Norte</td>
    </tr>
    <tr>
      <td><a href="#" onclick="verDetalle('inciCodigo=555')">31/12/2023</a> <span>22:40</span></td>
      <td><span>06:10</span> 01/01/2024</td>
      <td><img src="/etraffic/img/nivel_rojo.gif"></td>
      <td><b>MADRID</b> GETAFE</td>
      <td><b>A-4</b></td>
      <td>OBSTÁCULO FIJO POR ACCIDENTE km 12 sentido Sur</td>
    </tr>
    <tr>
      <td>02/01/2024</td><td></td><td></td><td><b>MADRID</b></td><td><b>M-30</b></td>
      <td>RETENCIÓN km 4</td>
    </tr>
    <tr><td>OBSTÁCULO FIJO</td><td>sin datos</td></tr>
  </tbody>
</table>
</body></html>"##
        .to_string()
}
