//! Static name tables for the DGT region and province filters
//!
//! Keys are upper-case and include accent-less and co-official spellings as
//! they appear in the feed and in user input.

use crate::model::UNKNOWN;

/// Autonomous community name -> DGT `ca` identifier
const REGION_IDS: &[(&str, &str)] = &[
    ("ANDALUCÍA", "1"),
    ("ANDALUCIA", "1"),
    ("ARAGÓN", "2"),
    ("ARAGON", "2"),
    ("ASTURIAS", "3"),
    ("PRINCIPADO DE ASTURIAS", "3"),
    ("ILLES BALEARS", "4"),
    ("BALEARES", "4"),
    ("ISLAS BALEARES", "4"),
    ("CANARIAS", "5"),
    ("CANTABRIA", "6"),
    ("CASTILLA Y LEÓN", "7"),
    ("CASTILLA Y LEON", "7"),
    ("CASTILLA-LA MANCHA", "8"),
    ("CASTILLA LA MANCHA", "8"),
    ("CATALUÑA", "9"),
    ("CATALUNA", "9"),
    ("CATALUNYA", "9"),
    ("COMUNIDAD VALENCIANA", "10"),
    ("COMUNITAT VALENCIANA", "10"),
    ("VALENCIA", "10"),
    ("EXTREMADURA", "11"),
    ("GALICIA", "12"),
    ("COMUNIDAD DE MADRID", "13"),
    ("MADRID", "13"),
    ("REGIÓN DE MURCIA", "14"),
    ("MURCIA", "14"),
    ("NAVARRA", "15"),
    ("COMUNIDAD FORAL DE NAVARRA", "15"),
    ("PAÍS VASCO", "16"),
    ("PAIS VASCO", "16"),
    ("EUSKADI", "16"),
    ("LA RIOJA", "17"),
    ("RIOJA", "17"),
    ("CEUTA", "18"),
    ("MELILLA", "19"),
];

/// Province name -> DGT `provIci` identifier (INE province code)
const PROVINCE_IDS: &[(&str, &str)] = &[
    // Andalucía
    ("ALMERÍA", "4"),
    ("ALMERIA", "4"),
    ("CÁDIZ", "11"),
    ("CADIZ", "11"),
    ("CÓRDOBA", "14"),
    ("CORDOBA", "14"),
    ("GRANADA", "18"),
    ("HUELVA", "21"),
    ("JAÉN", "23"),
    ("JAEN", "23"),
    ("MÁLAGA", "29"),
    ("MALAGA", "29"),
    ("SEVILLA", "41"),
    // Aragón
    ("HUESCA", "22"),
    ("TERUEL", "44"),
    ("ZARAGOZA", "50"),
    // Asturias
    ("ASTURIAS", "33"),
    // Baleares
    ("BALEARS, ILLES", "7"),
    ("BALEARES", "7"),
    ("ILLES BALEARS", "7"),
    // Canarias
    ("LAS PALMAS", "35"),
    ("PALMAS, LAS", "35"),
    ("SANTA CRUZ DE TENERIFE", "38"),
    ("S.C.TENERIFE", "38"),
    ("TENERIFE", "38"),
    // Cantabria
    ("CANTABRIA", "39"),
    // Castilla-La Mancha
    ("ALBACETE", "2"),
    ("CIUDAD REAL", "13"),
    ("CUENCA", "16"),
    ("GUADALAJARA", "19"),
    ("TOLEDO", "45"),
    // Castilla y León
    ("ÁVILA", "5"),
    ("AVILA", "5"),
    ("BURGOS", "9"),
    ("LEÓN", "24"),
    ("LEON", "24"),
    ("PALENCIA", "34"),
    ("SALAMANCA", "37"),
    ("SEGOVIA", "40"),
    ("SORIA", "42"),
    ("VALLADOLID", "47"),
    ("ZAMORA", "49"),
    // Cataluña
    ("BARCELONA", "8"),
    ("GIRONA", "17"),
    ("GERONA", "17"),
    ("LLEIDA", "25"),
    ("LÉRIDA", "25"),
    ("LERIDA", "25"),
    ("TARRAGONA", "43"),
    // Comunidad Valenciana
    ("ALICANTE", "3"),
    ("ALACANT", "3"),
    ("CASTELLÓN", "12"),
    ("CASTELLÓ", "12"),
    ("CASTELLON", "12"),
    ("VALENCIA", "46"),
    ("VALÈNCIA", "46"),
    // Extremadura
    ("BADAJOZ", "6"),
    ("CÁCERES", "10"),
    ("CACERES", "10"),
    // Galicia
    ("A CORUÑA", "15"),
    ("CORUÑA, A", "15"),
    ("LA CORUÑA", "15"),
    ("CORUÑA", "15"),
    ("LUGO", "27"),
    ("OURENSE", "32"),
    ("ORENSE", "32"),
    ("PONTEVEDRA", "36"),
    // Madrid
    ("MADRID", "28"),
    // Murcia
    ("MURCIA", "30"),
    // Navarra
    ("NAVARRA", "31"),
    // País Vasco
    ("ÁLAVA", "1"),
    ("ALAVA", "1"),
    ("ARABA", "1"),
    ("BIZKAIA", "48"),
    ("VIZCAYA", "48"),
    ("GIPUZKOA", "20"),
    ("GUIPÚZCOA", "20"),
    ("GUIPUZCOA", "20"),
    // La Rioja
    ("LA RIOJA", "26"),
    ("RIOJA, LA", "26"),
    // Ceuta y Melilla
    ("CEUTA", "51"),
    ("MELILLA", "52"),
];

/// Province identifier -> autonomous community, as labelled in records
const PROVINCE_REGIONS: &[(&str, &str)] = &[
    ("4", "ANDALUCÍA"),
    ("11", "ANDALUCÍA"),
    ("14", "ANDALUCÍA"),
    ("18", "ANDALUCÍA"),
    ("21", "ANDALUCÍA"),
    ("23", "ANDALUCÍA"),
    ("29", "ANDALUCÍA"),
    ("41", "ANDALUCÍA"),
    ("22", "ARAGÓN"),
    ("44", "ARAGÓN"),
    ("50", "ARAGÓN"),
    ("33", "ASTURIAS"),
    ("7", "ILLES BALEARS"),
    ("35", "CANARIAS"),
    ("38", "CANARIAS"),
    ("39", "CANTABRIA"),
    ("2", "CASTILLA-LA MANCHA"),
    ("13", "CASTILLA-LA MANCHA"),
    ("16", "CASTILLA-LA MANCHA"),
    ("19", "CASTILLA-LA MANCHA"),
    ("45", "CASTILLA-LA MANCHA"),
    ("5", "CASTILLA Y LEÓN"),
    ("9", "CASTILLA Y LEÓN"),
    ("24", "CASTILLA Y LEÓN"),
    ("34", "CASTILLA Y LEÓN"),
    ("37", "CASTILLA Y LEÓN"),
    ("40", "CASTILLA Y LEÓN"),
    ("42", "CASTILLA Y LEÓN"),
    ("47", "CASTILLA Y LEÓN"),
    ("49", "CASTILLA Y LEÓN"),
    ("8", "CATALUÑA"),
    ("17", "CATALUÑA"),
    ("25", "CATALUÑA"),
    ("43", "CATALUÑA"),
    ("3", "COMUNIDAD VALENCIANA"),
    ("12", "COMUNIDAD VALENCIANA"),
    ("46", "COMUNIDAD VALENCIANA"),
    ("6", "EXTREMADURA"),
    ("10", "EXTREMADURA"),
    ("15", "GALICIA"),
    ("27", "GALICIA"),
    ("32", "GALICIA"),
    ("36", "GALICIA"),
    ("28", "COMUNIDAD DE MADRID"),
    ("30", "REGIÓN DE MURCIA"),
    ("31", "NAVARRA"),
    ("1", "PAÍS VASCO"),
    ("20", "PAÍS VASCO"),
    ("48", "PAÍS VASCO"),
    ("26", "LA RIOJA"),
    ("51", "CEUTA"),
    ("52", "MELILLA"),
];

fn lookup<'a>(table: &'a [(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Returns the DGT identifier of an autonomous community, if known
pub fn region_id(name: &str) -> Option<&'static str> {
    lookup(REGION_IDS, &normalize_name(name))
}

/// Returns the DGT identifier of a province, if known
pub fn province_id(name: &str) -> Option<&'static str> {
    lookup(PROVINCE_IDS, &normalize_name(name))
}

/// Derives the autonomous community of a province
///
/// Unrecognized provinces map to [`UNKNOWN`], never to an empty string.
pub fn region_for_province(province: &str) -> &'static str {
    province_id(province)
        .and_then(|id| lookup(PROVINCE_REGIONS, id))
        .unwrap_or(UNKNOWN)
}
