//! Input/output helpers.
//!
//! - customer CSV + reference TSV ingest and validation (`ingest`)
//! - remapped CSV export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
