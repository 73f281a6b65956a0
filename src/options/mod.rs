use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fields::FieldId;
use crate::regions::RegionName;

/// Persisted row-layout configuration.
///
/// All three settings default to empty when unset so partially written
/// documents load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOptions {
    /// Machine name of the selected layout.
    #[serde(default)]
    pub layout: String,
    /// Region receiving fields without a usable assignment.
    #[serde(default)]
    pub default_region: RegionName,
    /// Explicit field-to-region assignments. May be partial.
    #[serde(default)]
    pub assigned_regions: HashMap<FieldId, RegionName>,
}

impl RowOptions {
    pub fn new(layout: impl Into<String>, default_region: impl Into<RegionName>) -> Self {
        Self {
            layout: layout.into(),
            default_region: default_region.into(),
            assigned_regions: HashMap::new(),
        }
    }

    pub fn assign(mut self, field: impl Into<FieldId>, region: impl Into<RegionName>) -> Self {
        self.assigned_regions.insert(field.into(), region.into());
        self
    }

    /// Region explicitly assigned to the field, if any. Validity against the
    /// selected layout is judged at resolution time, not here.
    pub fn assigned_region(&self, field: &str) -> Option<&str> {
        self.assigned_regions.get(field).map(String::as_str)
    }

    pub fn from_json(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load options from a JSON document on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Persist options as a JSON document.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(std::fs::write(path, self.to_json()?)?)
    }
}
