//! Declarative field schemas for the writable entities.
//!
//! A schema lists every client-writable column of an entity together with
//! its normalization kind and the spreadsheet header aliases it answers to.
//! The pipeline, the repositories and the import adapter all walk the same
//! table, so adding a column is a one-line change here plus a migration.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::types::DbId;

/// How a field is normalized on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty after trimming; stored trimmed.
    RequiredText,
    /// Trimmed; empty or absent becomes NULL.
    OptionalText,
    /// Number or string kept as text; empty or absent becomes NULL.
    NumericText,
    /// Boolean defaulting to `false`.
    Flag,
    /// List of trimmed strings; a comma-separated string is split.
    AllergenList,
    /// Optional foreign key to another row.
    Reference,
}

/// One column of an entity schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Column name, also the JSON key.
    pub name: &'static str,
    /// Human-readable label, used in messages and as the export header.
    pub label: &'static str,
    pub kind: FieldKind,
    /// Extra spreadsheet header spellings, already in [`header_key`] form.
    ///
    /// [`header_key`]: crate::transfer::header_key
    pub aliases: &'static [&'static str],
}

impl FieldDef {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            aliases: &[],
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// An entity whose writes go through the normalization pipeline.
pub trait Schema {
    /// Entity name used in error messages (`"Product"`).
    const ENTITY: &'static str;

    /// All client-writable fields, in column order.
    fn fields() -> &'static [FieldDef];
}

/// A normalized column value, ready to bind into a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(Option<String>),
    Flag(bool),
    List(Vec<String>),
    Id(Option<DbId>),
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(Some(s)) => Value::String(s.clone()),
            Self::Text(None) | Self::Id(None) => Value::Null,
            Self::Flag(b) => Value::Bool(*b),
            Self::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
            Self::Id(Some(id)) => Value::from(*id),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => s.as_deref(),
            _ => None,
        }
    }
}

/// Normalized values keyed by column name, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(BTreeMap<&'static str, FieldValue>);

impl FieldMap {
    pub(crate) fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.to_json()))
            .collect()
    }
}

/// A complete, normalized record for an insert. Every schema field is
/// present: absent optional fields hold NULL, flags hold `false` and lists
/// hold `[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft<E> {
    values: FieldMap,
    _schema: PhantomData<E>,
}

/// A partial update. Only fields the client supplied are present; each was
/// normalized by the same rule as on create. Omitted fields are untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch<E> {
    values: FieldMap,
    _schema: PhantomData<E>,
}

impl<E: Schema> Draft<E> {
    pub(crate) fn from_values(values: FieldMap) -> Self {
        Self {
            values,
            _schema: PhantomData,
        }
    }

    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(FieldValue::as_text)
    }

    pub fn to_json(&self) -> Map<String, Value> {
        self.values.to_json()
    }
}

impl<E: Schema> Patch<E> {
    pub(crate) fn from_values(values: FieldMap) -> Self {
        Self {
            values,
            _schema: PhantomData,
        }
    }

    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.get(name).is_some()
    }

    /// `true` when the client supplied no writable field at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> Map<String, Value> {
        self.values.to_json()
    }
}
