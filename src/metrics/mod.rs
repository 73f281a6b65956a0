use serde_json::json;

use crate::logging::{LogEvent, LogFields, LogLevel};

/// Counters accumulated across one or more render passes.
#[derive(Debug, Default, Clone)]
pub struct RenderMetrics {
    rows_rendered: u64,
    regions_composed: u64,
    empty_regions: u64,
    fallback_assignments: u64,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_row(&mut self, composed_regions: usize) {
        self.rows_rendered = self.rows_rendered.saturating_add(1);
        self.regions_composed = self
            .regions_composed
            .saturating_add(composed_regions as u64);
    }

    pub fn record_empty_regions(&mut self, count: usize) {
        if count > 0 {
            self.empty_regions = self.empty_regions.saturating_add(count as u64);
        }
    }

    pub fn record_fallbacks(&mut self, count: usize) {
        if count > 0 {
            self.fallback_assignments = self.fallback_assignments.saturating_add(count as u64);
        }
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            rows_rendered: self.rows_rendered,
            regions_composed: self.regions_composed,
            empty_regions: self.empty_regions,
            fallback_assignments: self.fallback_assignments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub rows_rendered: u64,
    pub regions_composed: u64,
    pub empty_regions: u64,
    pub fallback_assignments: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("rows_rendered".to_string(), json!(self.rows_rendered));
        map.insert("regions_composed".to_string(), json!(self.regions_composed));
        map.insert("empty_regions".to_string(), json!(self.empty_regions));
        map.insert(
            "fallback_assignments".to_string(),
            json!(self.fallback_assignments),
        );
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "render_metrics", self.as_fields())
    }
}
