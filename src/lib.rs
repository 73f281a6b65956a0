//! Region-based row layout for content listings.
//!
//! A listing row is a set of rendered fields; a layout declares named
//! regions. This crate buckets each field into a region from a
//! user-configured assignment table (falling back to a default region for
//! missing or stale assignments), renders each bucket in an isolated field
//! scope, and composes the surviving fragments into the selected layout's
//! slots.

pub mod compose;
pub mod engine;
pub mod error;
pub mod fields;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod options;
pub mod regions;
pub mod registry;
pub mod render;
pub mod settings;
pub mod width;

pub use compose::{CatalogComposer, Composed, LayoutComposer, RegionSlot};
pub use engine::{EngineConfig, RowLayoutEngine};
pub use error::{ComposeError, Result};
pub use fields::{FieldDefinition, FieldId, FieldSet, RowData};
pub use layout::{LayoutCatalog, LayoutDefinition, LayoutId, RegionDef};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, RenderMetrics};
pub use options::RowOptions;
pub use regions::{RegionMap, RegionName};
pub use registry::{RowId, RowState, RowStore};
pub use render::{
    Markup, RegionRenderer, RenderContext, ScopedFields, TextRenderer, TextRendererSettings,
};
pub use settings::{SelectField, SettingsForm, options_form};
pub use width::{display_width, is_blank};
