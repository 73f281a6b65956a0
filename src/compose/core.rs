use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{LayoutDefinition, LayoutId};
use crate::regions::RegionName;
use crate::render::Markup;

/// One filled region slot in the composed output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSlot {
    pub region: RegionName,
    pub markup: Markup,
}

impl RegionSlot {
    pub fn new(region: impl Into<RegionName>, markup: impl Into<Markup>) -> Self {
        Self {
            region: region.into(),
            markup: markup.into(),
        }
    }
}

/// Structured output of one composed row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composed {
    /// Layout the slots were composed for. `None` for the empty output.
    pub layout: Option<LayoutId>,
    pub regions: Vec<RegionSlot>,
}

impl Composed {
    /// The no-op output produced when nothing rendered.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn markup_for(&self, region: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|slot| slot.region == region)
            .map(|slot| slot.markup.as_str())
    }
}

/// Composes rendered region fragments into the final structured output.
pub trait LayoutComposer {
    /// `regions` holds only regions that produced visible content. An empty
    /// input must return an empty output without consulting any layout.
    fn compose(&mut self, regions: Vec<(RegionName, Markup)>) -> Result<Composed>;
}

/// Composer filling the slots of a resolved layout definition.
///
/// Slots are emitted in layout declaration order; fragments addressed to
/// regions the layout does not declare are dropped.
pub struct CatalogComposer {
    layout: LayoutDefinition,
}

impl CatalogComposer {
    pub fn new(layout: LayoutDefinition) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutDefinition {
        &self.layout
    }
}

impl LayoutComposer for CatalogComposer {
    fn compose(&mut self, regions: Vec<(RegionName, Markup)>) -> Result<Composed> {
        if regions.is_empty() {
            return Ok(Composed::empty());
        }

        let mut slots = Vec::new();
        for region in self.layout.regions() {
            if let Some((_, markup)) = regions.iter().find(|(name, _)| *name == region.name) {
                slots.push(RegionSlot::new(region.name.clone(), markup.clone()));
            }
        }

        Ok(Composed {
            layout: Some(self.layout.id.clone()),
            regions: slots,
        })
    }
}
