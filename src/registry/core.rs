use std::collections::{HashMap, HashSet};

use blake3::Hash;

use crate::compose::Composed;
use crate::error::Result;

/// Identifier of one listing row across render passes.
pub type RowId = String;

#[derive(Debug, Clone)]
pub struct RowState {
    pub output: Composed,
    hash: Option<Hash>,
    pub is_dirty: bool,
}

impl RowState {
    fn new() -> Self {
        Self {
            output: Composed::empty(),
            hash: None,
            is_dirty: false,
        }
    }

    fn update_output(&mut self, output: Composed, hash: Hash) {
        if self.hash.map(|h| h != hash).unwrap_or(true) {
            self.output = output;
            self.hash = Some(hash);
            self.is_dirty = true;
        }
    }
}

/// Store mapping listing rows to their last composed output.
///
/// Content hashes decide dirtiness, so hosts re-emit only rows whose
/// composed output actually changed between passes.
#[derive(Debug, Default)]
pub struct RowStore {
    entries: HashMap<RowId, RowState>,
    dirty: HashSet<RowId>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop rows absent from the latest pass.
    pub fn sync_rows(&mut self, present: &[RowId]) {
        let stale: Vec<_> = self
            .entries
            .keys()
            .filter(|id| !present.contains(*id))
            .cloned()
            .collect();
        for id in stale {
            self.entries.remove(&id);
            self.dirty.remove(&id);
        }
    }

    pub fn apply_output(&mut self, row_id: &RowId, output: Composed) -> Result<()> {
        let hash = blake3::hash(&serde_json::to_vec(&output)?);
        let entry = self
            .entries
            .entry(row_id.clone())
            .or_insert_with(RowState::new);
        entry.update_output(output, hash);
        if entry.is_dirty {
            self.dirty.insert(row_id.clone());
        }
        Ok(())
    }

    /// Drain changed rows, ordered by row id.
    pub fn take_dirty(&mut self) -> Vec<(RowId, Composed)> {
        let mut ids: Vec<_> = self.dirty.drain().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| {
                self.entries.get_mut(&id).map(|state| {
                    state.is_dirty = false;
                    (id.clone(), state.output.clone())
                })
            })
            .collect()
    }

    pub fn output_of(&self, row_id: &str) -> Option<&Composed> {
        self.entries.get(row_id).map(|state| &state.output)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
