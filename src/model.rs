//! # Domain Model: Filter Fields, Values and Presets
//!
//! This module defines the data types shared by every engine in the crate:
//! [`FilterField`], [`FilterValue`], [`FilterPreset`] and the [`Record`] trait
//! through which the host exposes its rows.
//!
//! ## Field Kinds and Values
//!
//! | Kind | Value | Neutral (inactive) value |
//! |------|-------|--------------------------|
//! | `Text` | `Text(String)` | `""` |
//! | `Select` | `Text(String)` (an option value) | `""` |
//! | `Date` | `Text(String)` (`YYYY-MM-DD`) | `""` |
//! | `Boolean` | `Bool(bool)` | `false` |
//! | `Number` | `Number(f64)` or `Text("")` | `""` |
//!
//! A field holding its neutral value is **inactive**: it never excludes a record.
//! `Boolean` is the odd one out: `false` is inactive and `true` means
//! "the record must be true".
//!
//! ## Records
//!
//! The engines never see concrete record types (users, clients, sessions...).
//! Hosts implement [`Record`] to expose an id, the strings free-text search runs
//! against, and a per-field projection used by field filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Select,
    Date,
    Boolean,
    Number,
}

impl FieldKind {
    /// The value a field of this kind holds when it filters nothing.
    pub fn neutral_value(self) -> FilterValue {
        match self {
            FieldKind::Boolean => FilterValue::Bool(false),
            _ => FilterValue::Text(String::new()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Select => "select",
            FieldKind::Date => "date",
            FieldKind::Boolean => "boolean",
            FieldKind::Number => "number",
        };
        f.write_str(name)
    }
}

/// A filter value, or a value projected out of a record.
///
/// Serialized untagged so presets persist as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// Whether this value, held by a filter field, takes part in matching.
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Bool(v) => *v,
            FilterValue::Number(n) => !n.is_nan(),
            FilterValue::Text(s) => !s.trim().is_empty(),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FilterValue::Text(s) => Cow::Borrowed(s),
            FilterValue::Bool(v) => Cow::Owned(v.to_string()),
            FilterValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// Boolean reading: `Bool` as-is, `Text` only for `"true"`/`"false"`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FilterValue::Bool(v) => Some(*v),
            FilterValue::Text(s) => match s.trim() {
                s if s.eq_ignore_ascii_case("true") => Some(true),
                s if s.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            },
            FilterValue::Number(_) => None,
        }
    }

    /// Numeric reading: `Number` as-is, `Text` when it parses.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => s.trim().parse::<f64>().ok(),
            FilterValue::Bool(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One filterable attribute and its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    /// Ordered choices, only meaningful for `Select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    pub value: FilterValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FilterField {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            value: kind.neutral_value(),
            placeholder: None,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        let mut field = Self::new(id, label, FieldKind::Select);
        field.options = options;
        field
    }

    pub fn date(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Date)
    }

    pub fn boolean(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Boolean)
    }

    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Number)
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.value.is_active()
    }

    /// Checks `value` against this field's kind, returning the value as it
    /// should be stored.
    ///
    /// `Number` fields take a number, an empty string, or a string that parses
    /// as a number (stored as `Number`). Every other mismatch yields `None`.
    pub fn coerce(&self, value: FilterValue) -> Option<FilterValue> {
        match (self.kind, value) {
            (FieldKind::Boolean, FilterValue::Bool(v)) => Some(FilterValue::Bool(v)),
            (FieldKind::Boolean, _) => None,
            (FieldKind::Number, FilterValue::Number(n)) if n.is_finite() => {
                Some(FilterValue::Number(n))
            }
            (FieldKind::Number, FilterValue::Text(s)) => {
                if s.trim().is_empty() {
                    Some(FilterValue::Text(String::new()))
                } else {
                    s.trim().parse::<f64>().ok().map(FilterValue::Number)
                }
            }
            (FieldKind::Number, _) => None,
            (_, FilterValue::Text(s)) => Some(FilterValue::Text(s)),
            _ => None,
        }
    }
}

/// A named snapshot of active filter values.
///
/// Presets are immutable once created: editing one means deleting it and
/// saving a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub filters: BTreeMap<String, FilterValue>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl FilterPreset {
    /// A fresh preset with a random id, stamped now.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        filters: BTreeMap<String, FilterValue>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            filters,
            is_default: false,
            created_at: Utc::now(),
        }
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// A row the engines can filter and act on.
pub trait Record {
    /// Stable identifier used by selections and bulk actions.
    fn record_id(&self) -> String;

    /// Strings the free-text query is matched against.
    fn searchable_text(&self) -> Vec<String>;

    /// The record's value for a filter field, or `None` if it has none.
    fn field_value(&self, field_id: &str) -> Option<FilterValue>;
}
