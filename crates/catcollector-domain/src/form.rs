//! Per-action form schemas.
//!
//! Every create/update action declares an ordered list of fields, each with a
//! kind and a constraint. Submitted `application/x-www-form-urlencoded` pairs
//! are cleaned against that schema before anything reaches the store. Unknown
//! keys are ignored.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Error key for messages that belong to the whole form.
pub const NON_FIELD_ERRORS: &str = "__all__";

const REQUIRED: &str = "This field is required.";

/// Shape and constraint of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whitespace-trimmed, non-empty text of at most `max_len` characters.
    Text { max_len: usize },
    /// Untrimmed, non-empty text that is never echoed back into a form.
    Secret { max_len: usize },
    /// Whole number in `0..=i32::MAX`.
    NonNegativeInt,
    /// Set of row ids; the key may repeat. Never required.
    IdSet,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Secret { .. } => "secret",
            Self::NonNegativeInt => "non_negative_int",
            Self::IdSet => "id_set",
        }
    }

    pub fn max_len(self) -> Option<usize> {
        match self {
            Self::Text { max_len } | Self::Secret { max_len } => Some(max_len),
            Self::NonNegativeInt | Self::IdSet => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Text { max_len },
        }
    }

    pub const fn secret(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Secret { max_len },
        }
    }

    pub const fn non_negative_int(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::NonNegativeInt,
        }
    }

    pub const fn id_set(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::IdSet,
        }
    }
}

/// `Create` requires every scalar field; `Update` cleans only the fields present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// A cleaned field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Int(i32),
    Ids(Vec<i32>),
}

/// Output of [`FormSchema::clean`], keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedData(BTreeMap<&'static str, FieldValue>);

impl CleanedData {
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.0.remove(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.0.get(name) {
            Some(FieldValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Ids sorted ascending with duplicates removed.
    pub fn ids(&self, name: &str) -> Option<&[i32]> {
        match self.0.get(name) {
            Some(FieldValue::Ids(ids)) => Some(ids),
            _ => None,
        }
    }
}

/// Validation messages keyed by field name (or [`NON_FIELD_ERRORS`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("invalid form data")]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single message on a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when no message was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Serializable description of a form, used as render context.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub non_field_errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected: Vec<String>,
    pub errors: Vec<String>,
}

/// An ordered list of field specs for one action.
#[derive(Debug, Clone, Copy)]
pub struct FormSchema {
    fields: &'static [FieldSpec],
}

impl FormSchema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// Validate submitted pairs. All field errors are collected before returning.
    pub fn clean(&self, input: &[(String, String)], mode: Mode) -> Result<CleanedData, FieldErrors> {
        let mut cleaned = BTreeMap::new();
        let mut errors = FieldErrors::new();

        for spec in self.fields {
            let mut submitted = input
                .iter()
                .filter(|(key, _)| key == spec.name)
                .map(|(_, value)| value.as_str())
                .peekable();

            if spec.kind == FieldKind::IdSet {
                if submitted.peek().is_none() && mode == Mode::Update {
                    continue;
                }
                match clean_ids(submitted) {
                    Ok(ids) => {
                        cleaned.insert(spec.name, FieldValue::Ids(ids));
                    }
                    Err(message) => errors.add(spec.name, message),
                }
                continue;
            }

            let Some(raw) = submitted.next() else {
                if mode == Mode::Create {
                    errors.add(spec.name, REQUIRED);
                }
                continue;
            };
            match clean_scalar(spec.kind, raw) {
                Ok(value) => {
                    cleaned.insert(spec.name, value);
                }
                Err(message) => errors.add(spec.name, message),
            }
        }

        errors.into_result(CleanedData(cleaned))
    }

    /// Describe the form with the given values and errors. Secrets are never echoed.
    pub fn describe(&self, values: &[(String, String)], errors: &FieldErrors, mode: Mode) -> FormView {
        let fields = self
            .fields
            .iter()
            .map(|spec| {
                let mut submitted = values
                    .iter()
                    .filter(|(key, _)| key == spec.name)
                    .map(|(_, value)| value.clone());
                let (value, selected) = match spec.kind {
                    FieldKind::Secret { .. } => (None, Vec::new()),
                    FieldKind::IdSet => (None, submitted.filter(|v| !v.is_empty()).collect()),
                    FieldKind::Text { .. } | FieldKind::NonNegativeInt => (submitted.next(), Vec::new()),
                };
                FieldView {
                    name: spec.name,
                    kind: spec.kind.as_str(),
                    required: mode == Mode::Create && spec.kind != FieldKind::IdSet,
                    max_length: spec.kind.max_len(),
                    value,
                    selected,
                    errors: errors.get(spec.name).to_vec(),
                }
            })
            .collect();
        FormView {
            fields,
            non_field_errors: errors.get(NON_FIELD_ERRORS).to_vec(),
        }
    }
}

fn clean_scalar(kind: FieldKind, raw: &str) -> Result<FieldValue, String> {
    match kind {
        FieldKind::Text { max_len } => {
            let value = raw.trim();
            check_length(value, max_len)?;
            Ok(FieldValue::Text(value.to_owned()))
        }
        FieldKind::Secret { max_len } => {
            check_length(raw, max_len)?;
            Ok(FieldValue::Text(raw.to_owned()))
        }
        FieldKind::NonNegativeInt => {
            let value = raw.trim();
            if value.is_empty() {
                return Err(REQUIRED.to_owned());
            }
            let parsed: i64 = value
                .parse()
                .map_err(|_| "Enter a whole number.".to_owned())?;
            if parsed < 0 {
                return Err("Ensure this value is greater than or equal to 0.".to_owned());
            }
            let parsed = i32::try_from(parsed).map_err(|_| {
                format!("Ensure this value is less than or equal to {}.", i32::MAX)
            })?;
            Ok(FieldValue::Int(parsed))
        }
        FieldKind::IdSet => unreachable!("id sets are cleaned by clean_ids"),
    }
}

fn check_length(value: &str, max_len: usize) -> Result<(), String> {
    if value.is_empty() {
        return Err(REQUIRED.to_owned());
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(format!(
            "Ensure this value has at most {max_len} characters (it has {len})."
        ));
    }
    Ok(())
}

/// Empty values are skipped, so a lone empty entry submits the empty set.
fn clean_ids<'a>(values: impl Iterator<Item = &'a str>) -> Result<Vec<i32>, String> {
    let mut ids = BTreeSet::new();
    for value in values.map(str::trim).filter(|v| !v.is_empty()) {
        let id = value
            .parse::<i32>()
            .map_err(|_| format!("\"{value}\" is not a valid value."))?;
        ids.insert(id);
    }
    Ok(ids.into_iter().collect())
}
