//! Integration tests against mock HTTP servers
//!
//! The incident source and the geocoder are both replaced by wiremock
//! servers, so these tests never touch the network.

mod fixtures;
mod geocode_tests;
mod pipeline_tests;
