use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, Result};
use crate::regions::RegionName;

/// Machine name of a layout definition.
pub type LayoutId = String;

/// One named placement slot declared by a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDef {
    pub name: RegionName,
    pub label: String,
}

impl RegionDef {
    pub fn new(name: impl Into<RegionName>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// A named layout template declaring its ordered set of regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    pub id: LayoutId,
    pub label: String,
    regions: Vec<RegionDef>,
}

impl LayoutDefinition {
    pub fn new(id: impl Into<LayoutId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            regions: Vec::new(),
        }
    }

    pub fn with_region(mut self, name: impl Into<RegionName>, label: impl Into<String>) -> Self {
        self.regions.push(RegionDef::new(name, label));
        self
    }

    pub fn has_region(&self, name: &str) -> bool {
        self.regions.iter().any(|region| region.name == name)
    }

    pub fn regions(&self) -> impl Iterator<Item = &RegionDef> {
        self.regions.iter()
    }

    /// Machine names of all regions, in declaration order.
    pub fn region_names(&self) -> Vec<RegionName> {
        self.regions.iter().map(|region| region.name.clone()).collect()
    }

    pub fn region_label(&self, name: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|region| region.name == name)
            .map(|region| region.label.as_str())
    }
}

/// Registry of the layout definitions available to a listing.
///
/// Registration order is preserved; the first entry doubles as the
/// substitute definition for the settings surface when the configured id
/// cannot be resolved.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    definitions: Vec<LayoutDefinition>,
}

impl LayoutCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same id
    /// in place. A definition without regions is rejected.
    pub fn register(&mut self, definition: LayoutDefinition) -> Result<()> {
        if definition.regions.is_empty() {
            return Err(ComposeError::EmptyLayout(definition.id));
        }
        match self
            .definitions
            .iter_mut()
            .find(|existing| existing.id == definition.id)
        {
            Some(slot) => *slot = definition,
            None => self.definitions.push(definition),
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&LayoutDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.id == id)
            .ok_or_else(|| ComposeError::UnknownLayout(id.to_string()))
    }

    pub fn first(&self) -> Option<&LayoutDefinition> {
        self.definitions.first()
    }

    /// `(id, label)` pairs for a layout select control.
    pub fn layout_options(&self) -> Vec<(LayoutId, String)> {
        self.definitions
            .iter()
            .map(|definition| (definition.id.clone(), definition.label.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
