//! The fixed import schema.
//!
//! Each output column is declared once, together with the rule that fills it.
//! Columns appear in the output file in declaration order.

use crate::domain::{BusinessPolicy, EnrichedRecord};

/// Reads one optional value off an enriched record.
pub type Accessor = fn(&EnrichedRecord) -> Option<&str>;

/// How an output column gets its value.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Same literal on every row.
    Constant(String),
    /// Copy a source value; empty string when absent.
    Source(Accessor),
    /// First accessor yielding a non-empty value wins; empty string otherwise.
    FirstNonEmpty(Vec<Accessor>),
    /// Copy a source value, substituting `default` when it is absent or blank.
    DefaultIfBlank { source: Accessor, default: String },
    /// Same list on every row.
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct OutputField {
    pub name: String,
    pub rule: FieldRule,
}

#[derive(Debug, Clone)]
pub struct OutputSchema {
    fields: Vec<OutputField>,
}

impl OutputSchema {
    pub fn new(fields: Vec<OutputField>) -> Self {
        Self { fields }
    }

    /// The customer-import schema, with business values taken from `policy`.
    pub fn standard(policy: &BusinessPolicy) -> Self {
        let status = || FieldRule::Constant(policy.status.clone());
        let tba = |source: Accessor| FieldRule::DefaultIfBlank {
            source,
            default: policy.blank_default.clone(),
        };
        let override_duplicate = if policy.override_duplicate_code { "True" } else { "False" };

        let fields = vec![
            // General
            field("no", blank()),
            field("code", FieldRule::Source(customer_code)),
            field("name", tba(customer_name)),
            field("description", blank()),
            field("status", status()),
            field("tags", blank()),
            field("overrideDuplicateCode", FieldRule::Constant(override_duplicate.to_string())),
            field("types", FieldRule::List(policy.company_types.clone())),
            // Country & currency
            field("country.name", FieldRule::Constant(policy.country_name.clone())),
            field("country.alpha3", FieldRule::Constant(policy.country_alpha3.clone())),
            field("currency.code", FieldRule::Constant(policy.currency_code.clone())),
            field("currency.uuid", blank()),
            // Billing / creditor
            field("billTo.code", blank()),
            field("billTo.uuid", blank()),
            field("creditorCode", blank()),
            field("creditorTerm", FieldRule::Source(term)),
            // Debtor
            field(
                "debtorCode",
                FieldRule::FirstNonEmpty(vec![debtor_code_new as Accessor, debtor_code_legacy]),
            ),
            field("debtorTerm", blank()),
            // Tax / registration
            field("taxNumber", blank()),
            field("registration", blank()),
            field("uuid", blank()),
            // Address
            field("address.name", tba(customer_name)),
            field("address.type", FieldRule::Constant(policy.address_type.clone())),
            field("address.countryAlpha3", FieldRule::Constant(policy.country_alpha3.clone())),
            field("address.address1", FieldRule::Source(address_line_1)),
            field("address.address2", FieldRule::Source(address_line_2)),
            field("address.address3", FieldRule::Source(address_line_3)),
            field("address.address4", FieldRule::Source(address_line_4)),
            field("address.city", FieldRule::Source(city)),
            field("address.district", FieldRule::Source(city)),
            field("address.postCode", FieldRule::Source(postcode)),
            field("address.areaCode", tba(area_code)),
            field("address.zone", tba(zone)),
            field("address.location.type", blank()),
            field("address.location.coordinates", blank()),
            field("address.phone", FieldRule::Source(phone)),
            field("address.fax", FieldRule::Source(fax)),
            field("address.tags", FieldRule::List(policy.address_tags.clone())),
            field("address.status", status()),
            field("address.uuid", blank()),
            field("address.zzz", blank()),
            // Contact
            field("contact.name", FieldRule::Source(contact_name)),
            field("contact.email", FieldRule::Source(email)),
            field("contact.phone", FieldRule::Source(phone)),
            field("contact.title", blank()),
            field("contact.designation", blank()),
            field("contact.notes", blank()),
            field("contact.status", status()),
            field("contact.uuid", blank()),
            field("contact.zzz", blank()),
        ];

        Self::new(fields)
    }

    pub fn fields(&self) -> &[OutputField] {
        &self.fields
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn field(name: &str, rule: FieldRule) -> OutputField {
    OutputField {
        name: name.to_string(),
        rule,
    }
}

fn blank() -> FieldRule {
    FieldRule::Constant(String::new())
}

// Accessors. Kept as plain fns so they coerce to `Accessor`.

fn customer_code(r: &EnrichedRecord) -> Option<&str> {
    r.input.customer_code.as_deref()
}

fn customer_name(r: &EnrichedRecord) -> Option<&str> {
    r.input.customer_name.as_deref()
}

fn term(r: &EnrichedRecord) -> Option<&str> {
    r.input.term.as_deref()
}

fn debtor_code_new(r: &EnrichedRecord) -> Option<&str> {
    r.input.debtor_code_new.as_deref()
}

fn debtor_code_legacy(r: &EnrichedRecord) -> Option<&str> {
    r.input.debtor_code_legacy.as_deref()
}

fn address_line_1(r: &EnrichedRecord) -> Option<&str> {
    r.input.address_line(0)
}

fn address_line_2(r: &EnrichedRecord) -> Option<&str> {
    r.input.address_line(1)
}

fn address_line_3(r: &EnrichedRecord) -> Option<&str> {
    r.input.address_line(2)
}

fn address_line_4(r: &EnrichedRecord) -> Option<&str> {
    r.input.address_line(3)
}

fn city(r: &EnrichedRecord) -> Option<&str> {
    r.city()
}

fn postcode(r: &EnrichedRecord) -> Option<&str> {
    r.postcode_str()
}

fn area_code(r: &EnrichedRecord) -> Option<&str> {
    r.input.area_code.as_deref()
}

fn zone(r: &EnrichedRecord) -> Option<&str> {
    r.input.zone.as_deref()
}

fn phone(r: &EnrichedRecord) -> Option<&str> {
    r.input.phone.as_deref()
}

fn fax(r: &EnrichedRecord) -> Option<&str> {
    r.input.fax.as_deref()
}

fn contact_name(r: &EnrichedRecord) -> Option<&str> {
    r.input.contact_name.as_deref()
}

fn email(r: &EnrichedRecord) -> Option<&str> {
    r.input.email.as_deref()
}
