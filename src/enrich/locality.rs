//! Postcode → city/state lookup.

use std::collections::HashMap;

use crate::domain::{Locality, Postcode};

/// In-memory reference table, keyed by canonical postcode.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<Postcode, Locality>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry unless the key is already present.
    ///
    /// Returns `false` for a duplicate key; the first entry is kept so lookups
    /// stay deterministic regardless of how many times a postcode repeats.
    pub fn insert(&mut self, postcode: Postcode, locality: Locality) -> bool {
        match self.entries.entry(postcode) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(locality);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Left-join semantics: a missing postcode or an unknown key yields `None`.
    pub fn resolve(&self, postcode: Option<&Postcode>) -> Option<&Locality> {
        self.entries.get(postcode?)
    }
}

impl FromIterator<(Postcode, Locality)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (Postcode, Locality)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (postcode, locality) in iter {
            table.insert(postcode, locality);
        }
        table
    }
}
