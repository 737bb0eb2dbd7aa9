//! # Filter Engine
//!
//! [`FilterEngine`] owns the free-text query, the registered [`FilterField`]s and
//! the session's [`FilterPreset`] list.
//!
//! ## Matching
//!
//! A record matches when it passes **every** active field (logical AND) and,
//! if the query is not blank, at least one of its searchable strings contains
//! the query (case-insensitive). Inactive fields never exclude anything; see
//! [`matching`] for the per-kind predicates.
//!
//! ## Presets
//!
//! - `save_preset` snapshots only the *active* field values.
//! - `apply_preset` is a total reset, not a merge: fields missing from the
//!   preset go back to their neutral value.
//! - `delete_preset` is idempotent.
//!
//! The engine only keeps presets in memory; persisting them is the host's job
//! (see [`crate::store`]).

use crate::error::{Result, SiftError};
use crate::model::{FilterField, FilterPreset, FilterValue, Record};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

pub mod matching;

#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    query: String,
    fields: Vec<FilterField>,
    presets: Vec<FilterPreset>,
}

impl FilterEngine {
    /// Registers `fields`, failing on duplicate ids or values that do not fit
    /// their field's kind.
    pub fn new(fields: Vec<FilterField>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut registered = Vec::with_capacity(fields.len());
        for mut field in fields {
            if !seen.insert(field.id.clone()) {
                return Err(SiftError::DuplicateField(field.id));
            }
            field.value = field
                .coerce(field.value.clone())
                .ok_or_else(|| SiftError::TypeMismatch {
                    field: field.id.clone(),
                    kind: field.kind,
                })?;
            registered.push(field);
        }

        Ok(Self {
            query: String::new(),
            fields: registered,
            presets: Vec::new(),
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn presets(&self) -> &[FilterPreset] {
        &self.presets
    }

    /// Replaces the query. Does not filter anything by itself.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn set_field_value(&mut self, id: &str, value: impl Into<FilterValue>) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| SiftError::UnknownField(id.to_string()))?;

        field.value = field
            .coerce(value.into())
            .ok_or_else(|| SiftError::TypeMismatch {
                field: field.id.clone(),
                kind: field.kind,
            })?;
        Ok(())
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.matches_with(&record.searchable_text(), |id| record.field_value(id))
    }

    /// Matching over raw projections, for hosts that don't implement [`Record`].
    pub fn matches_with<S, F>(&self, searchable: &[S], field_value: F) -> bool
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<FilterValue>,
    {
        let fields_pass = self.fields.iter().filter(|f| f.is_active()).all(|f| {
            matching::field_matches(f.kind, &f.value, field_value(&f.id).as_ref())
        });

        fields_pass && matching::query_matches(&self.query, searchable)
    }

    /// The records that match, in load order.
    pub fn filter<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.trim().is_empty() || self.fields.iter().any(FilterField::is_active)
    }

    /// Number of active fields; the query is not counted.
    pub fn active_filter_count(&self) -> usize {
        self.fields.iter().filter(|f| f.is_active()).count()
    }

    /// The active field values keyed by field id.
    pub fn active_values(&self) -> BTreeMap<String, FilterValue> {
        self.fields
            .iter()
            .filter(|f| f.is_active())
            .map(|f| (f.id.clone(), f.value.clone()))
            .collect()
    }

    pub fn clear_all(&mut self) {
        self.query.clear();
        for field in &mut self.fields {
            field.value = field.kind.neutral_value();
        }
    }

    pub fn save_preset(&mut self, name: &str, description: &str) -> Result<FilterPreset> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SiftError::Validation(
                "Preset name cannot be empty".to_string(),
            ));
        }

        let preset = FilterPreset::new(name, description.trim(), self.active_values());
        debug!(preset = %preset.id, name = %preset.name, "saved filter preset");
        self.presets.push(preset.clone());
        Ok(preset)
    }

    /// Sets every registered field from `preset`, resetting fields it omits.
    ///
    /// All values are checked before any field changes, so a rejected preset
    /// leaves the engine untouched.
    pub fn apply_preset(&mut self, preset: &FilterPreset) -> Result<()> {
        for id in preset.filters.keys() {
            if self.field(id).is_none() {
                warn!(preset = %preset.id, field = %id, "preset references unregistered field");
            }
        }

        let mut next = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match preset.filters.get(&field.id) {
                Some(value) => {
                    field
                        .coerce(value.clone())
                        .ok_or_else(|| SiftError::TypeMismatch {
                            field: field.id.clone(),
                            kind: field.kind,
                        })?
                }
                None => field.kind.neutral_value(),
            };
            next.push(value);
        }

        for (field, value) in self.fields.iter_mut().zip(next) {
            field.value = value;
        }
        debug!(preset = %preset.id, "applied filter preset");
        Ok(())
    }

    /// Removes a preset from the session list; absent ids are a no-op.
    pub fn delete_preset(&mut self, id: &str) -> Option<FilterPreset> {
        let pos = self.presets.iter().position(|p| p.id == id)?;
        debug!(preset = %id, "deleted filter preset");
        Some(self.presets.remove(pos))
    }

    /// Seeds the session list, typically from a [`crate::store::PresetStore`].
    pub fn set_presets(&mut self, presets: Vec<FilterPreset>) {
        self.presets = presets;
    }

    pub fn find_preset(&self, id: &str) -> Option<&FilterPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn default_preset(&self) -> Option<&FilterPreset> {
        self.presets.iter().find(|p| p.is_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectOption;
    use crate::test_utils::{user, TestRecord};
    use chrono::Utc;

    fn engine() -> FilterEngine {
        FilterEngine::new(vec![
            FilterField::select(
                "role",
                "Role",
                vec![
                    SelectOption::new("ADMIN", "Admin"),
                    SelectOption::new("USER", "User"),
                ],
            ),
            FilterField::text("email", "Email"),
            FilterField::boolean("approved", "Approved only"),
            FilterField::number("sessions", "Sessions"),
        ])
        .unwrap()
    }

    fn people() -> Vec<TestRecord> {
        vec![
            user("1", "John Carter", "ADMIN", true),
            user("2", "Joan Watson", "USER", false),
            user("3", "Bob Stone", "USER", true),
        ]
    }

    fn ids(records: &[&TestRecord]) -> Vec<String> {
        records.iter().map(|r| r.record_id()).collect()
    }

    #[test]
    fn rejects_duplicate_field_ids() {
        let result = FilterEngine::new(vec![
            FilterField::text("name", "Name"),
            FilterField::text("name", "Other"),
        ]);
        assert!(matches!(result, Err(SiftError::DuplicateField(id)) if id == "name"));
    }

    #[test]
    fn unknown_field_is_an_error() {
        let mut engine = engine();
        let err = engine.set_field_value("nope", "x").unwrap_err();
        assert!(matches!(err, SiftError::UnknownField(id) if id == "nope"));
    }

    #[test]
    fn mismatched_value_is_an_error() {
        let mut engine = engine();
        let err = engine.set_field_value("approved", "yes").unwrap_err();
        assert!(matches!(err, SiftError::TypeMismatch { .. }));
    }

    #[test]
    fn no_filters_match_everything() {
        let engine = engine();
        let records = people();
        assert_eq!(engine.filter(&records).len(), 3);
    }

    #[test]
    fn query_matches_any_projection_case_insensitively() {
        let mut engine = engine();
        engine.set_query("JO");
        let records = people();
        assert_eq!(ids(&engine.filter(&records)), vec!["1", "2"]);
    }

    #[test]
    fn whitespace_query_matches_everything() {
        let mut engine = engine();
        engine.set_query("   ");
        let records = people();
        assert_eq!(engine.filter(&records).len(), 3);
        assert!(!engine.has_active_filters());
    }

    #[test]
    fn filters_are_conjunctive_regardless_of_query() {
        let mut engine = engine();
        engine.set_field_value("role", "USER").unwrap();
        engine.set_field_value("approved", true).unwrap();
        let records = people();
        assert_eq!(ids(&engine.filter(&records)), vec!["3"]);

        // A query that matches the excluded record does not bring it back.
        engine.set_query("joan");
        assert!(engine.filter(&records).is_empty());
    }

    #[test]
    fn false_boolean_is_inactive() {
        let mut engine = engine();
        engine.set_field_value("approved", false).unwrap();
        let records = people();
        assert_eq!(engine.filter(&records).len(), 3);
        assert!(!engine.has_active_filters());
    }

    #[test]
    fn number_field_accepts_numeric_text() {
        let mut engine = engine();
        engine.set_field_value("sessions", "3").unwrap();
        let records = people();
        assert_eq!(ids(&engine.filter(&records)), vec!["3"]);
    }

    #[test]
    fn matches_with_raw_projections() {
        let mut engine = engine();
        engine.set_field_value("role", "ADMIN").unwrap();
        let pass = engine.matches_with(&["anything"], |id| {
            (id == "role").then(|| FilterValue::from("ADMIN"))
        });
        let fail = engine.matches_with(&["anything"], |_| None);
        assert!(pass);
        assert!(!fail);
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut engine = engine();
        engine.set_query("jo");
        engine.set_field_value("role", "ADMIN").unwrap();
        engine.set_field_value("approved", true).unwrap();
        engine.set_field_value("sessions", 4.0).unwrap();
        assert!(engine.has_active_filters());
        assert_eq!(engine.active_filter_count(), 3);

        engine.clear_all();
        assert!(!engine.has_active_filters());
        assert_eq!(engine.query(), "");
        assert_eq!(
            engine.field("approved").unwrap().value,
            FilterValue::Bool(false)
        );
        assert_eq!(engine.field("role").unwrap().value, FilterValue::from(""));
    }

    #[test]
    fn save_preset_requires_a_name() {
        let mut engine = engine();
        let err = engine.save_preset("   ", "desc").unwrap_err();
        assert!(matches!(err, SiftError::Validation(_)));
        assert!(engine.presets().is_empty());
    }

    #[test]
    fn save_preset_captures_only_active_fields() {
        let mut engine = engine();
        engine.set_field_value("role", "ADMIN").unwrap();
        engine.set_field_value("approved", false).unwrap();
        let preset = engine.save_preset("  Admins ", " all admins ").unwrap();

        assert_eq!(preset.name, "Admins");
        assert_eq!(preset.description, "all admins");
        assert_eq!(preset.filters.len(), 1);
        assert_eq!(preset.filters["role"], FilterValue::from("ADMIN"));
        assert_eq!(engine.presets().len(), 1);
    }

    #[test]
    fn apply_preset_is_a_total_reset() {
        let mut engine = engine();
        engine.set_field_value("email", "example.org").unwrap();
        engine.set_field_value("approved", true).unwrap();

        let mut filters = BTreeMap::new();
        filters.insert("role".to_string(), FilterValue::from("USER"));
        let preset = FilterPreset {
            id: "p1".into(),
            name: "Users".into(),
            description: String::new(),
            filters,
            is_default: false,
            created_at: Utc::now(),
        };
        engine.apply_preset(&preset).unwrap();

        assert_eq!(engine.field("role").unwrap().value, FilterValue::from("USER"));
        assert_eq!(engine.field("email").unwrap().value, FilterValue::from(""));
        assert_eq!(
            engine.field("approved").unwrap().value,
            FilterValue::Bool(false)
        );
    }

    #[test]
    fn preset_round_trips_through_apply() {
        let mut engine = engine();
        engine.set_field_value("role", "USER").unwrap();
        engine.set_field_value("approved", true).unwrap();
        engine.set_field_value("sessions", 3.0).unwrap();
        let preset = engine.save_preset("Busy users", "").unwrap();

        engine.clear_all();
        engine.apply_preset(&preset).unwrap();
        assert_eq!(engine.active_values(), preset.filters);
    }

    #[test]
    fn rejected_preset_leaves_fields_untouched() {
        let mut engine = engine();
        engine.set_field_value("role", "ADMIN").unwrap();

        let mut filters = BTreeMap::new();
        filters.insert("email".to_string(), FilterValue::from("x"));
        filters.insert("approved".to_string(), FilterValue::from("not a bool"));
        let preset = FilterPreset {
            id: "bad".into(),
            name: "Bad".into(),
            description: String::new(),
            filters,
            is_default: false,
            created_at: Utc::now(),
        };

        assert!(engine.apply_preset(&preset).is_err());
        assert_eq!(engine.field("role").unwrap().value, FilterValue::from("ADMIN"));
        assert_eq!(engine.field("email").unwrap().value, FilterValue::from(""));
    }

    #[test]
    fn apply_preset_ignores_unregistered_fields() {
        let mut engine = engine();
        let mut filters = BTreeMap::new();
        filters.insert("gone".to_string(), FilterValue::from("x"));
        filters.insert("role".to_string(), FilterValue::from("ADMIN"));
        let preset = FilterPreset {
            id: "p".into(),
            name: "Legacy".into(),
            description: String::new(),
            filters,
            is_default: false,
            created_at: Utc::now(),
        };
        engine.apply_preset(&preset).unwrap();
        assert_eq!(engine.active_filter_count(), 1);
    }

    #[test]
    fn delete_preset_is_idempotent() {
        let mut engine = engine();
        engine.set_field_value("role", "ADMIN").unwrap();
        let preset = engine.save_preset("Admins", "").unwrap();

        assert!(engine.delete_preset(&preset.id).is_some());
        assert!(engine.delete_preset(&preset.id).is_none());
        assert!(engine.presets().is_empty());
    }

    #[test]
    fn default_preset_lookup() {
        let mut engine = engine();
        let mut preset = engine.save_preset("Everything", "").unwrap();
        assert!(engine.default_preset().is_none());

        preset.is_default = true;
        engine.set_presets(vec![preset.clone()]);
        assert_eq!(engine.default_preset().map(|p| &p.id), Some(&preset.id));
        assert!(engine.find_preset(&preset.id).is_some());
    }
}
