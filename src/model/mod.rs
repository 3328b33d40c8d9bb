//! Record types shared by the extractor, resolver and output layers

mod geo;
pub(crate) mod record;

pub use geo::{GeocodeResult, PrecisionLabel};
pub use record::{Category, IncidentRecord, UNKNOWN};
