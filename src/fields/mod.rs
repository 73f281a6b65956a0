use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of one displayable field within a listing configuration.
pub type FieldId = String;

/// Metadata describing a displayable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub label: String,
}

impl FieldDefinition {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Ordered collection of field definitions keyed by field id.
///
/// Insertion order is meaningful and preserved; re-inserting an existing id
/// replaces the definition in place without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(FieldId, FieldDefinition)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<FieldId>, definition: FieldDefinition) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = definition,
            None => self.entries.push((id, definition)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&FieldDefinition> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, definition)| definition)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &FieldId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &FieldDefinition)> {
        self.entries.iter().map(|(id, definition)| (id, definition))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a narrowed copy containing only the listed ids, in this set's
    /// own order. Unknown ids are ignored.
    pub fn narrow(&self, keep: &[FieldId]) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(id, _)| keep.contains(id))
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<(FieldId, FieldDefinition)> for FieldSet {
    fn from_iter<T: IntoIterator<Item = (FieldId, FieldDefinition)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (id, definition) in iter {
            set.insert(id, definition);
        }
        set
    }
}

/// One listing row's values keyed by field id.
#[derive(Debug, Clone, Default)]
pub struct RowData {
    values: HashMap<FieldId, String>,
}

impl RowData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<FieldId>, value: impl Into<String>) -> &mut Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }
}
