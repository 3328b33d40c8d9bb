//! Upstream incident source
//!
//! This module contains everything that talks to the DGT listing:
//! - Region and province identifier tables
//! - Listing URL assembly
//! - The HTTP fetch itself

mod fetcher;
mod query;
pub mod regions;

pub use fetcher::{build_source_client, fetch_markup};
pub use query::QueryBuilder;
pub use regions::{province_id, region_for_province, region_id};
