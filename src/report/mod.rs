//! Console reporting: previews and run summaries.

pub mod format;

pub use format::*;
