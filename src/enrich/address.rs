//! Address combination.

use crate::domain::InputRecord;

/// Join the address lines into one searchable string.
///
/// Missing lines contribute an empty string, so four lines always produce
/// three separators. Line content is kept as-is (no trimming).
pub fn combine_address(record: &InputRecord) -> String {
    record
        .address_lines
        .iter()
        .map(|line| line.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}
