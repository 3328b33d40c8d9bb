use crate::source::regions::{province_id, region_id};
use url::Url;

/// Fixed filter parameters: "event" incidents, OTROS category, newest first
const FIXED_PARAMS: &[(&str, &str)] = &[
    ("caracter", "acontecimiento"),
    ("accion_consultar", "Consultar"),
    ("IncidenciasOTROS", "IncidenciasOTROS"),
    ("ordenacion", "fechahora_ini-DESC"),
];

/// Assembles incident listing URLs for the DGT endpoint
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base_url: Url,
}

impl QueryBuilder {
    /// Creates a builder for the given listing endpoint
    ///
    /// # Errors
    ///
    /// Returns a parse error if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Builds the listing URL filtered by region and/or province
    ///
    /// Names are matched case-insensitively. An unrecognized name yields an
    /// empty identifier, which the upstream service reads as "no filter".
    ///
    /// # Example
    ///
    /// ```
    /// use dgt_balizas::source::QueryBuilder;
    ///
    /// let builder = QueryBuilder::new("https://infocar.dgt.es/etraffic/Incidencias").unwrap();
    /// let url = builder.build_url(None, Some("madrid"));
    /// assert!(url.as_str().contains("provIci=28"));
    /// ```
    pub fn build_url(&self, region: Option<&str>, province: Option<&str>) -> Url {
        let ca = region.and_then(region_id).unwrap_or_default();
        let prov = province.and_then(province_id).unwrap_or_default();

        let mut url = self.base_url.clone();
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("ca", ca);
            pairs.append_pair("provIci", prov);
            for (key, value) in FIXED_PARAMS {
                pairs.append_pair(key, value);
            }
        }
        url
    }
}
