//! Record enrichment.
//!
//! Responsibilities:
//!
//! - combine address lines into one string (`address`)
//! - pull a 5-digit postcode out of that string (`postcode`)
//! - look up city/state for the postcode (`locality`)

pub mod address;
pub mod locality;
pub mod postcode;

pub use address::*;
pub use locality::*;
pub use postcode::*;

use tracing::debug;

use crate::domain::{EnrichedRecord, InputRecord, MatchPolicy};

/// Soft-condition counters for one enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub rows: usize,
    pub postcodes_found: usize,
    pub localities_resolved: usize,
}

/// Enrich every input record. Never fails: records without a postcode or
/// without a reference match simply carry `None`.
pub fn enrich_records(
    records: &[InputRecord],
    reference: &ReferenceTable,
    policy: MatchPolicy,
) -> (Vec<EnrichedRecord>, EnrichStats) {
    let mut stats = EnrichStats::default();
    let mut out = Vec::with_capacity(records.len());

    for (idx, input) in records.iter().enumerate() {
        stats.rows += 1;

        let full_address = combine_address(input);
        let postcode = extract_postcode(&full_address, policy);
        let locality = reference.resolve(postcode.as_ref()).cloned();

        match (&postcode, &locality) {
            (None, _) => debug!(row = idx, "no postcode in address"),
            (Some(pc), None) => debug!(row = idx, postcode = %pc, "postcode not in reference table"),
            _ => {}
        }
        if postcode.is_some() {
            stats.postcodes_found += 1;
        }
        if locality.is_some() {
            stats.localities_resolved += 1;
        }

        out.push(EnrichedRecord {
            input: input.clone(),
            full_address,
            postcode,
            locality,
        });
    }

    (out, stats)
}
