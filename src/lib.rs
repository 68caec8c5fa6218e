//! `customer-remap` library crate.
//!
//! The binary (`remap`) is a thin wrapper around this library so that:
//!
//! - the postcode extraction, lookup and mapping rules are testable without spawning processes
//! - alternate schemas and business values can be swapped in from tests

pub mod app;
pub mod cli;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod io;
pub mod logging;
pub mod mapping;
pub mod report;
