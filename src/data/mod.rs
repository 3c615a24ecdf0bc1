//! Data layer: core types, loading, and the view pipeline.
//!
//! ```text
//!   candidate CSV paths
//!        |
//!        v
//!    loader   resolve path, parse CSV
//!        |
//!        v
//!    Dataset  Vec<SchoolRecord> + unique value indices (Arc-shared)
//!        |
//!        v
//!    views    filter / rank / compare / aggregate, plain result data
//! ```
pub mod loader;
pub mod model;
pub mod views;
