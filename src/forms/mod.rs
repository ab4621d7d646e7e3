//! Drafts built from submitted form fields, with per-field validation.
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::listing::{Business, Fsic, ListKind, Occupancy};

pub mod business;
pub mod fsic;

pub use business::{business_draft, BUSINESS_FIELDS, OCCUPANCY_FIELDS, STATUS_FIELD};
pub use fsic::{fsic_draft, FSIC_FIELDS};

pub type FormFields = HashMap<String, String>;

/// Decode an `application/x-www-form-urlencoded` body.
pub fn parse_form(body: &[u8]) -> FormFields {
    url::form_urlencoded::parse(body).into_owned().collect()
}

/// Prefill values for an edit form.
pub fn fields_of<R: Serialize>(record: &R) -> FormFields {
    let Ok(Value::Object(map)) = serde_json::to_value(record) else {
        return FormFields::new();
    };
    map.into_iter()
        .map(|(k, v)| {
            let s = match v {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (k, s)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Text,
    Date,
    /// Peso amount, may carry ₱ and thousands separators.
    Amount,
    /// Non-negative whole number.
    Count,
    Select(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: Input,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, input: Input) -> Self {
        Self {
            name,
            label,
            input,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, input: Input) -> Self {
        Self {
            name,
            label,
            input,
            required: false,
        }
    }
}

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Trimmed value of a field, empty when absent.
pub(crate) fn value<'a>(fields: &'a FormFields, name: &str) -> &'a str {
    fields.get(name).map(|s| s.trim()).unwrap_or("")
}

/// Checks presence of every required field.
pub(crate) fn check_required(fields: &FormFields, specs: &[FieldSpec], errors: &mut FieldErrors) {
    for spec in specs.iter().filter(|s| s.required) {
        if value(fields, spec.name).is_empty() {
            errors.add(spec.name, format!("{} is required.", spec.label));
        }
    }
}

pub(crate) fn parse_count(
    fields: &FormFields,
    name: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> u32 {
    let raw = value(fields, name);
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            errors.add(name, format!("{label} must be a whole number."));
            0
        }
    }
}

/// Tables whose records staff create or edit through a form.
pub trait DraftKind: ListKind {
    fn staff_fields() -> Vec<FieldSpec>;

    fn draft(
        fields: &FormFields,
        base: Option<&Self::Record>,
        today: NaiveDate,
    ) -> Result<Self::Record, FieldErrors>;
}

impl DraftKind for Business {
    fn staff_fields() -> Vec<FieldSpec> {
        [BUSINESS_FIELDS, &[STATUS_FIELD][..]].concat()
    }

    fn draft(
        fields: &FormFields,
        base: Option<&Self::Record>,
        today: NaiveDate,
    ) -> Result<Self::Record, FieldErrors> {
        business_draft(fields, base, today)
    }
}

impl DraftKind for Occupancy {
    fn staff_fields() -> Vec<FieldSpec> {
        OCCUPANCY_FIELDS.to_vec()
    }

    fn draft(
        fields: &FormFields,
        base: Option<&Self::Record>,
        today: NaiveDate,
    ) -> Result<Self::Record, FieldErrors> {
        business_draft(fields, base, today)
    }
}

impl DraftKind for Fsic {
    fn staff_fields() -> Vec<FieldSpec> {
        [FSIC_FIELDS, &[STATUS_FIELD][..]].concat()
    }

    fn draft(
        fields: &FormFields,
        base: Option<&Self::Record>,
        _today: NaiveDate,
    ) -> Result<Self::Record, FieldErrors> {
        fsic_draft(fields, base)
    }
}
