//! Import backend for the federal property inventory dashboard.
//!
//! The pipeline ingests the two IOLP spreadsheet exports, cleanses asset
//! names, maps rows into the `owned` and `leases` tables, reconciles new
//! lease records against stored ones by street address, and writes in
//! fixed-size batches through a narrow store interface.

pub mod ingestion;
pub mod store;
