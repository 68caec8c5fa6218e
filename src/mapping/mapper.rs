//! Record mapping into the output schema.

use crate::domain::EnrichedRecord;
use crate::mapping::schema::{FieldRule, OutputSchema};

/// Separator used when a list-valued field is rendered into one CSV cell.
pub const LIST_SEPARATOR: &str = ";";

/// One output row; `values[i]` belongs to the schema's i-th column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    values: Vec<String>,
}

impl OutputRecord {
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Mapped rows plus their column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    pub columns: Vec<String>,
    pub rows: Vec<OutputRecord>,
}

impl OutputTable {
    /// Look up one cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.values.get(col).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolve one field rule against a record. Always yields a value.
pub fn resolve_field(rule: &FieldRule, record: &EnrichedRecord) -> String {
    match rule {
        FieldRule::Constant(value) => value.clone(),
        FieldRule::Source(get) => get(record).unwrap_or_default().to_string(),
        FieldRule::FirstNonEmpty(chain) => chain
            .iter()
            .find_map(|get| get(record).filter(|v| !v.is_empty()))
            .unwrap_or_default()
            .to_string(),
        FieldRule::DefaultIfBlank { source, default } => match source(record) {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => default.clone(),
        },
        FieldRule::List(items) => items.join(LIST_SEPARATOR),
    }
}

pub fn map_record(schema: &OutputSchema, record: &EnrichedRecord) -> OutputRecord {
    let values = schema
        .fields()
        .iter()
        .map(|f| resolve_field(&f.rule, record))
        .collect();
    OutputRecord { values }
}

pub fn map_records(schema: &OutputSchema, records: &[EnrichedRecord]) -> OutputTable {
    OutputTable {
        columns: schema.columns().map(str::to_string).collect(),
        rows: records.iter().map(|r| map_record(schema, r)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusinessPolicy, InputRecord, Locality, Postcode};

    fn enriched(input: InputRecord) -> EnrichedRecord {
        EnrichedRecord {
            input,
            full_address: String::new(),
            postcode: None,
            locality: None,
        }
    }

    fn map_one(input: InputRecord) -> OutputTable {
        let schema = OutputSchema::standard(&BusinessPolicy::default());
        map_records(&schema, &[enriched(input)])
    }

    #[test]
    fn blank_name_becomes_sentinel() {
        for name in [None, Some(""), Some("   ")] {
            let table = map_one(InputRecord {
                customer_name: name.map(str::to_string),
                ..InputRecord::default()
            });
            assert_eq!(table.value(0, "name"), Some("TBA"));
            assert_eq!(table.value(0, "address.name"), Some("TBA"));
        }
    }

    #[test]
    fn non_blank_name_passes_through_unchanged() {
        let table = map_one(InputRecord {
            customer_name: Some(" Syarikat ABC Sdn Bhd".to_string()),
            ..InputRecord::default()
        });
        assert_eq!(table.value(0, "name"), Some(" Syarikat ABC Sdn Bhd"));
    }

    #[test]
    fn debtor_code_prefers_new_then_legacy_then_empty() {
        let both = map_one(InputRecord {
            debtor_code_new: Some("D-NEW".to_string()),
            debtor_code_legacy: Some("D-OLD".to_string()),
            ..InputRecord::default()
        });
        assert_eq!(both.value(0, "debtorCode"), Some("D-NEW"));

        let legacy_only = map_one(InputRecord {
            debtor_code_legacy: Some("D-OLD".to_string()),
            ..InputRecord::default()
        });
        assert_eq!(legacy_only.value(0, "debtorCode"), Some("D-OLD"));

        let empty_new = map_one(InputRecord {
            debtor_code_new: Some(String::new()),
            debtor_code_legacy: Some("D-OLD".to_string()),
            ..InputRecord::default()
        });
        assert_eq!(empty_new.value(0, "debtorCode"), Some("D-OLD"));

        let neither = map_one(InputRecord::default());
        assert_eq!(neither.value(0, "debtorCode"), Some(""));
    }

    #[test]
    fn every_column_is_present_for_an_empty_record() {
        let schema = OutputSchema::standard(&BusinessPolicy::default());
        let table = map_records(&schema, &[enriched(InputRecord::default())]);
        assert_eq!(table.rows[0].values().len(), schema.len());
        assert_eq!(table.value(0, "address.areaCode"), Some("TBA"));
        assert_eq!(table.value(0, "address.zone"), Some("TBA"));
        assert_eq!(table.value(0, "address.city"), Some(""));
        assert_eq!(table.value(0, "address.postCode"), Some(""));
        assert_eq!(table.value(0, "code"), Some(""));
    }

    #[test]
    fn constants_and_lists_repeat_on_every_row() {
        let schema = OutputSchema::standard(&BusinessPolicy::default());
        let rows = vec![enriched(InputRecord::default()), enriched(InputRecord::default())];
        let table = map_records(&schema, &rows);
        for row in 0..2 {
            assert_eq!(table.value(row, "types"), Some("shipperConsignee"));
            assert_eq!(table.value(row, "address.tags"), Some("isDefault"));
            assert_eq!(table.value(row, "country.name"), Some("Malaysia"));
            assert_eq!(table.value(row, "currency.code"), Some("MYR"));
            assert_eq!(table.value(row, "overrideDuplicateCode"), Some("True"));
            assert_eq!(table.value(row, "contact.status"), Some("activated"));
        }
    }

    #[test]
    fn enrichment_fields_feed_address_columns() {
        let schema = OutputSchema::standard(&BusinessPolicy::default());
        let record = EnrichedRecord {
            input: InputRecord {
                phone: Some("03-1234 5678".to_string()),
                address_lines: vec![Some("No 1".to_string()), None, Some("50000 KL".to_string())],
                ..InputRecord::default()
            },
            full_address: "No 1  50000 KL".to_string(),
            postcode: Postcode::canonicalize("50000"),
            locality: Some(Locality {
                city: "Kuala Lumpur".to_string(),
                state: "WP".to_string(),
            }),
        };
        let table = map_records(&schema, &[record]);
        assert_eq!(table.value(0, "address.address1"), Some("No 1"));
        assert_eq!(table.value(0, "address.address2"), Some(""));
        assert_eq!(table.value(0, "address.address4"), Some(""));
        assert_eq!(table.value(0, "address.city"), Some("Kuala Lumpur"));
        assert_eq!(table.value(0, "address.district"), Some("Kuala Lumpur"));
        assert_eq!(table.value(0, "address.postCode"), Some("50000"));
        assert_eq!(table.value(0, "address.phone"), Some("03-1234 5678"));
        assert_eq!(table.value(0, "contact.phone"), Some("03-1234 5678"));
    }

    #[test]
    fn substituted_policy_changes_constants() {
        let policy = BusinessPolicy {
            blank_default: "N/A".to_string(),
            company_types: vec!["haulier".to_string(), "transporter".to_string()],
            currency_code: "SGD".to_string(),
            ..BusinessPolicy::default()
        };
        let schema = OutputSchema::standard(&policy);
        let table = map_records(&schema, &[enriched(InputRecord::default())]);
        assert_eq!(table.value(0, "name"), Some("N/A"));
        assert_eq!(table.value(0, "types"), Some("haulier;transporter"));
        assert_eq!(table.value(0, "currency.code"), Some("SGD"));
    }
}
