//! Shared domain types.
//!
//! Records flow through the pipeline as:
//!
//! - `InputRecord`: one row of the customer CSV, read once and never mutated
//! - `EnrichedRecord`: the input plus derived address/postcode/locality fields
//! - `OutputRecord` (see `mapping`): the fixed target schema
//!
//! Run-wide knobs live in `RemapConfig`, which is built once and passed down
//! explicitly so tests can swap column names and business values.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

/// Which 5-digit token wins when an address contains more than one.
///
/// Postcodes conventionally follow the street and town tokens, so `Last` is
/// the default. Older exports of the same data were processed with `First`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchPolicy {
    First,
    #[default]
    Last,
}

/// A postcode in canonical form: exactly five ASCII digits, leading zeros kept.
///
/// All joins compare this representation, never a numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Postcode(String);

impl Postcode {
    pub const WIDTH: usize = 5;

    /// Canonicalize a raw postcode value.
    ///
    /// Accepts 1..=5 ASCII digits (left-padded with zeros), optionally followed
    /// by a `.0` suffix as left behind by spreadsheet float exports. Anything
    /// else yields `None`.
    pub fn canonicalize(raw: &str) -> Option<Self> {
        let s = raw.trim();
        let s = s.strip_suffix(".0").unwrap_or(s);
        if s.is_empty() || s.len() > Self::WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(format!("{s:0>width$}", width = Self::WIDTH)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// City/state pair looked up from the reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    pub city: String,
    pub state: String,
}

/// One customer row. `None` means the column is absent or the cell is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRecord {
    pub customer_code: Option<String>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub term: Option<String>,
    pub debtor_code_new: Option<String>,
    pub debtor_code_legacy: Option<String>,
    pub area_code: Option<String>,
    pub zone: Option<String>,
    /// Address lines in column order (`CustomerAdd1..`).
    pub address_lines: Vec<Option<String>>,
}

impl InputRecord {
    pub fn address_line(&self, idx: usize) -> Option<&str> {
        self.address_lines.get(idx).and_then(|v| v.as_deref())
    }
}

/// An input row plus everything derived from it during enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub input: InputRecord,
    pub full_address: String,
    pub postcode: Option<Postcode>,
    pub locality: Option<Locality>,
}

impl EnrichedRecord {
    pub fn postcode_str(&self) -> Option<&str> {
        self.postcode.as_ref().map(Postcode::as_str)
    }

    pub fn city(&self) -> Option<&str> {
        self.locality.as_ref().map(|l| l.city.as_str())
    }

    pub fn state(&self) -> Option<&str> {
        self.locality.as_ref().map(|l| l.state.as_str())
    }
}

/// Names of the input columns read from the customer CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumns {
    pub customer_code: String,
    pub customer_name: String,
    pub phone: String,
    pub fax: String,
    pub contact_name: String,
    pub email: String,
    pub term: String,
    pub debtor_code_new: String,
    pub debtor_code_legacy: String,
    pub area_code: String,
    pub zone: String,
    /// Required. A missing address column aborts the run.
    pub address_lines: Vec<String>,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            customer_code: "CustomerCode".to_string(),
            customer_name: "CustomerName".to_string(),
            phone: "CustomerTel".to_string(),
            fax: "CustomerFax".to_string(),
            contact_name: "CustomerContact".to_string(),
            email: "CustomerEmail".to_string(),
            term: "CustomerTerm".to_string(),
            debtor_code_new: "CustomerDebtorCodeNew".to_string(),
            debtor_code_legacy: "customerDebtorCode".to_string(),
            area_code: "areaCode".to_string(),
            zone: "zone".to_string(),
            address_lines: ["CustomerAdd1", "CustomerAdd2", "CustomerAdd3", "CustomerAdd4"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Business-fixed values stamped onto every output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessPolicy {
    /// Substituted when a required name-like field is blank.
    pub blank_default: String,
    /// Allowed: billing, customs, depot, forwarder, freightForwarder, haulier,
    /// liner, oneTimeVendor, port, shipperConsignee, shippingAgent,
    /// transporter, warehouse.
    pub company_types: Vec<String>,
    /// Allowed: BILLING, CONTACT, DELIVERY, MAILING, WAREHOUSE.
    pub address_type: String,
    pub address_tags: Vec<String>,
    pub country_name: String,
    pub country_alpha3: String,
    pub currency_code: String,
    pub status: String,
    pub override_duplicate_code: bool,
}

impl Default for BusinessPolicy {
    fn default() -> Self {
        Self {
            blank_default: "TBA".to_string(),
            company_types: vec!["shipperConsignee".to_string()],
            address_type: "BILLING".to_string(),
            address_tags: vec!["isDefault".to_string()],
            country_name: "Malaysia".to_string(),
            country_alpha3: "MYS".to_string(),
            currency_code: "MYR".to_string(),
            status: "activated".to_string(),
            override_duplicate_code: true,
        }
    }
}

/// Everything a single remap run needs.
#[derive(Debug, Clone)]
pub struct RemapConfig {
    pub input_path: PathBuf,
    pub reference_path: PathBuf,
    pub output_dir: PathBuf,
    pub match_policy: MatchPolicy,
    /// Rows shown in console previews.
    pub preview_rows: usize,
    pub source: SourceColumns,
    pub policy: BusinessPolicy,
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("./input.csv"),
            reference_path: PathBuf::from("./db.csv"),
            output_dir: PathBuf::from("."),
            match_policy: MatchPolicy::default(),
            preview_rows: 5,
            source: SourceColumns::default(),
            policy: BusinessPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postcode_keeps_and_restores_leading_zeros() {
        assert_eq!(Postcode::canonicalize("01000").unwrap().as_str(), "01000");
        assert_eq!(Postcode::canonicalize("1000").unwrap().as_str(), "01000");
        assert_eq!(Postcode::canonicalize(" 1000.0 ").unwrap().as_str(), "01000");
    }

    #[test]
    fn postcode_rejects_non_digit_or_long_values() {
        assert!(Postcode::canonicalize("").is_none());
        assert!(Postcode::canonicalize("123456").is_none());
        assert!(Postcode::canonicalize("5O000").is_none());
        assert!(Postcode::canonicalize("1000.5").is_none());
    }

    #[test]
    fn default_policy_matches_import_target() {
        let policy = BusinessPolicy::default();
        assert_eq!(policy.blank_default, "TBA");
        assert_eq!(policy.company_types, vec!["shipperConsignee"]);
        assert_eq!(policy.country_alpha3, "MYS");
        assert_eq!(SourceColumns::default().address_lines.len(), 4);
    }
}
