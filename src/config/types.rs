use serde::Deserialize;

/// Browser-like user agent sent to the incident source
pub const DEFAULT_BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for dgt-balizas
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// public DGT and Nominatim endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub geocoder: GeocoderConfig,
    pub map: MapConfig,
}

/// Upstream incident table configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Incident listing endpoint (query parameters are appended)
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header; the source blocks obvious bots
    pub user_agent: String,

    /// Accept-Language header
    pub accept_language: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://infocar.dgt.es/etraffic/Incidencias".to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_BROWSER_AGENT.to_string(),
            accept_language: "es-ES,es;q=0.9,en;q=0.8".to_string(),
        }
    }
}

/// Geocoding service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeocoderConfig {
    /// Free-text search endpoint
    pub endpoint: String,

    /// ISO country code used for the `countrycodes` filter
    pub country_code: String,

    /// Country name appended to every query
    pub country_name: String,

    /// Minimum time between outbound requests (milliseconds)
    pub min_interval_ms: u64,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Name of the client, sent in the identifying User-Agent
    pub client_name: String,

    /// Version of the client
    pub client_version: String,

    /// URL with information about the client
    pub contact_url: String,

    /// Email address for client-related contact
    pub contact_email: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            country_code: "es".to_string(),
            country_name: "España".to_string(),
            min_interval_ms: 1000,
            timeout_secs: 10,
            client_name: "BalizasActivasDGT".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/dgt-balizas/dgt-balizas".to_string(),
            contact_email: "balizas@example.com".to_string(),
        }
    }
}

impl GeocoderConfig {
    /// Identifying user agent: `Name/Version (+ContactURL; ContactEmail)`
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.client_name, self.client_version, self.contact_url, self.contact_email
        )
    }
}

/// Static map page configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MapConfig {
    /// Where the generated HTML page is written
    pub output_path: String,

    /// Maximum number of records geocoded per run
    pub max_records: usize,

    /// Initial map center (latitude, longitude)
    pub center: [f64; 2],

    /// Initial zoom level
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            output_path: "mapa_balizas.html".to_string(),
            max_records: 20,
            center: [40.4168, -3.7038],
            zoom: 6,
        }
    }
}
