use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::compose::{CatalogComposer, Composed, LayoutComposer};
use crate::error::Result;
use crate::fields::{FieldSet, RowData};
use crate::layout::{LayoutCatalog, LayoutDefinition};
use crate::logging::{LogLevel, Logger, fields_from, json_kv};
use crate::metrics::{MetricSnapshot, RenderMetrics};
use crate::options::RowOptions;
use crate::regions::{RegionMap, RegionName};
use crate::registry::{RowId, RowStore};
use crate::render::{Markup, RegionRenderer, RenderContext, TextRenderer};

/// Configuration knobs for the engine.
#[derive(Clone)]
pub struct EngineConfig {
    /// Optional structured logger.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<RenderMetrics>>>,
    /// Target field used on emitted log events.
    pub log_target: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            log_target: "rowlay::engine".to_string(),
        }
    }
}

impl EngineConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(RenderMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RenderMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Orchestrator for one configured listing.
///
/// Resolves the configured layout at construction, buckets fields into
/// regions (cached for the duration of a pass), renders each bucket inside
/// a narrowed field scope, and hands the surviving fragments to the
/// composer. Regions whose renderer produces nothing are omitted, never an
/// error.
pub struct RowLayoutEngine {
    options: RowOptions,
    layout: LayoutDefinition,
    ctx: RenderContext,
    renderer: Box<dyn RegionRenderer>,
    composer: Box<dyn LayoutComposer>,
    config: EngineConfig,
    region_map: Option<RegionMap>,
}

impl std::fmt::Debug for RowLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowLayoutEngine").finish_non_exhaustive()
    }
}

impl RowLayoutEngine {
    /// Build an engine with injected collaborators. Fails with
    /// `UnknownLayout` when the configured layout id cannot be resolved,
    /// which keeps layout lookup off the per-row render path entirely.
    pub fn new(
        fields: FieldSet,
        options: RowOptions,
        catalog: &LayoutCatalog,
        renderer: Box<dyn RegionRenderer>,
        composer: Box<dyn LayoutComposer>,
    ) -> Result<Self> {
        let layout = catalog.get(&options.layout)?.clone();
        Ok(Self {
            options,
            layout,
            ctx: RenderContext::new(fields),
            renderer,
            composer,
            config: EngineConfig::default(),
            region_map: None,
        })
    }

    /// Build an engine with the default text renderer and catalog composer.
    pub fn with_defaults(
        fields: FieldSet,
        options: RowOptions,
        catalog: &LayoutCatalog,
    ) -> Result<Self> {
        let layout = catalog.get(&options.layout)?.clone();
        let composer = CatalogComposer::new(layout.clone());
        Ok(Self {
            options,
            layout,
            ctx: RenderContext::new(fields),
            renderer: Box::new(TextRenderer::with_default()),
            composer: Box::new(composer),
            config: EngineConfig::default(),
            region_map: None,
        })
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn options(&self) -> &RowOptions {
        &self.options
    }

    pub fn layout(&self) -> &LayoutDefinition {
        &self.layout
    }

    /// Full field set visible outside any region scope.
    pub fn fields(&self) -> &FieldSet {
        self.ctx.fields()
    }

    /// The region map for the current pass, resolving it on first access.
    pub fn region_map(&mut self) -> &RegionMap {
        let map = match self.region_map.take() {
            Some(map) => map,
            None => self.resolve_region_map(),
        };
        self.region_map.get_or_insert(map)
    }

    /// Discard the cached region map at the end of a pass.
    pub fn end_pass(&mut self) {
        self.region_map = None;
    }

    /// Render one row into its composed output.
    pub fn render_row(&mut self, row: &RowData) -> Result<Composed> {
        let map = match self.region_map.take() {
            Some(map) => map,
            None => self.resolve_region_map(),
        };

        let mut rendered: Vec<(RegionName, Markup)> = Vec::new();
        let mut empty_regions = 0usize;
        for (region, bucket) in map.iter() {
            let narrowed = self.ctx.fields().narrow(bucket);
            let renderer = self.renderer.as_mut();
            let outcome = self.ctx.scoped(narrowed, |scoped| renderer.render(scoped, row));
            match outcome? {
                Some(markup) => rendered.push((region.clone(), markup)),
                None => empty_regions += 1,
            }
        }
        self.region_map = Some(map);

        let composed = self.composer.compose(rendered)?;
        self.note_row(&composed, empty_regions);
        Ok(composed)
    }

    /// Render a batch of rows as one pass, track their outputs in `store`,
    /// and return the rows whose composed output changed.
    pub fn render_listing(
        &mut self,
        rows: &[(RowId, RowData)],
        store: &mut RowStore,
    ) -> Result<Vec<(RowId, Composed)>> {
        let present: Vec<RowId> = rows.iter().map(|(id, _)| id.clone()).collect();
        store.sync_rows(&present);

        for (id, row) in rows {
            let composed = self.render_row(row)?;
            store.apply_output(id, composed)?;
        }

        self.end_pass();
        Ok(store.take_dirty())
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let handle = self.config.metrics.as_ref()?;
        let guard = match handle.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Some(guard.snapshot())
    }

    /// Emit the current metrics snapshot through the configured logger.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) = (&self.config.logger, self.metrics_snapshot()) {
            let target = format!("{}.metrics", self.config.log_target);
            let _ = logger.log_event(snapshot.to_log_event(&target));
        }
    }

    fn resolve_region_map(&self) -> RegionMap {
        let invalid = self
            .ctx
            .fields()
            .ids()
            .filter(|id| {
                self.options
                    .assigned_region(id)
                    .is_some_and(|region| !self.layout.has_region(region))
            })
            .count();

        let map = RegionMap::resolve(
            self.ctx.fields().ids().cloned(),
            &self.options.assigned_regions,
            &self.options.default_region,
            &self.layout.region_names(),
        );

        if let Some(handle) = &self.config.metrics {
            let mut guard = match handle.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.record_fallbacks(invalid);
        }
        if let Some(logger) = &self.config.logger {
            let _ = logger.log_with_fields(
                LogLevel::Debug,
                &self.config.log_target,
                "region_map_resolved",
                fields_from([
                    json_kv("layout", json!(self.layout.id.clone())),
                    json_kv("regions", json!(map.len())),
                    json_kv("invalid_assignments", json!(invalid)),
                ]),
            );
        }

        map
    }

    fn note_row(&self, composed: &Composed, empty_regions: usize) {
        if let Some(handle) = &self.config.metrics {
            let mut guard = match handle.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.record_row(composed.regions.len());
            guard.record_empty_regions(empty_regions);
        }
        if let Some(logger) = &self.config.logger {
            let _ = logger.log_with_fields(
                LogLevel::Debug,
                &self.config.log_target,
                "row_composed",
                fields_from([
                    json_kv("regions", json!(composed.regions.len())),
                    json_kv("empty_regions", json!(empty_regions)),
                ]),
            );
        }
    }
}
