//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - record types (`InputRecord`, `EnrichedRecord`)
//! - the canonical `Postcode` and looked-up `Locality`
//! - run configuration (`RemapConfig`, `SourceColumns`, `BusinessPolicy`, `MatchPolicy`)

pub mod types;

pub use types::*;
