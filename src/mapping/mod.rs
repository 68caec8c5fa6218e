//! Output schema and record mapping.
//!
//! The schema is data (`OutputSchema`), the mapper is a small pure function
//! over it, so alternate schemas can be tested without touching the pipeline.

pub mod mapper;
pub mod schema;

pub use mapper::*;
pub use schema::*;
