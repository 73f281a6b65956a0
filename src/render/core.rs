use std::ops::Deref;

use crate::error::Result;
use crate::fields::{FieldSet, RowData};
use crate::width::is_blank;

/// Rendered fragment for one region. Plain text, possibly ANSI-styled.
pub type Markup = String;

/// Shared rendering state for one listing.
///
/// Holds the set of fields currently visible to the rendering machinery.
/// Per-region rendering narrows this set through [`RenderContext::scoped`]
/// so a restricted bucket never leaks into the rest of the pass.
#[derive(Debug)]
pub struct RenderContext {
    fields: FieldSet,
}

impl RenderContext {
    pub fn new(fields: FieldSet) -> Self {
        Self { fields }
    }

    /// Fields visible in the current scope.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn replace_fields(&mut self, fields: FieldSet) {
        self.fields = fields;
    }

    /// Run `scope` with `narrowed` as the visible field set.
    ///
    /// The original set is restored on every exit path, including early
    /// returns and unwinding, via the [`ScopedFields`] drop guard.
    pub fn scoped<T>(
        &mut self,
        narrowed: FieldSet,
        scope: impl FnOnce(&RenderContext) -> T,
    ) -> T {
        let guard = ScopedFields::new(self, narrowed);
        scope(&guard)
    }
}

/// Drop guard that swaps a narrowed field set onto a [`RenderContext`] and
/// puts the original back when it goes out of scope.
pub struct ScopedFields<'a> {
    ctx: &'a mut RenderContext,
    original: Option<FieldSet>,
}

impl<'a> ScopedFields<'a> {
    pub fn new(ctx: &'a mut RenderContext, narrowed: FieldSet) -> Self {
        let original = std::mem::replace(&mut ctx.fields, narrowed);
        Self {
            ctx,
            original: Some(original),
        }
    }
}

impl Deref for ScopedFields<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &RenderContext {
        self.ctx
    }
}

impl Drop for ScopedFields<'_> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            self.ctx.fields = original;
        }
    }
}

/// Renders the fields visible on the context into one region fragment.
pub trait RegionRenderer {
    /// Produce the fragment for the current field scope.
    ///
    /// `Ok(None)` means nothing visible was produced and the region should
    /// be omitted from the composed output.
    fn render(&mut self, ctx: &RenderContext, row: &RowData) -> Result<Option<Markup>>;
}

/// Renderer runtime parameters.
#[derive(Debug, Clone)]
pub struct TextRendererSettings {
    pub show_labels: bool,
    pub label_separator: String,
}

impl Default for TextRendererSettings {
    fn default() -> Self {
        Self {
            show_labels: true,
            label_separator: ": ".to_string(),
        }
    }
}

/// Default renderer producing one text line per field with a value.
pub struct TextRenderer {
    settings: TextRendererSettings,
}

impl TextRenderer {
    pub fn new(settings: TextRendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(TextRendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut TextRendererSettings {
        &mut self.settings
    }
}

impl RegionRenderer for TextRenderer {
    fn render(&mut self, ctx: &RenderContext, row: &RowData) -> Result<Option<Markup>> {
        let mut lines = Vec::new();
        for (id, definition) in ctx.fields().iter() {
            let Some(value) = row.value(id) else {
                continue;
            };
            if is_blank(value) {
                continue;
            }
            if self.settings.show_labels {
                lines.push(format!(
                    "{}{}{}",
                    definition.label, self.settings.label_separator, value
                ));
            } else {
                lines.push(value.to_string());
            }
        }

        let markup = lines.join("\n");
        if is_blank(&markup) {
            return Ok(None);
        }
        Ok(Some(markup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComposeError;
    use crate::fields::FieldDefinition;

    fn fields() -> FieldSet {
        let mut fields = FieldSet::new();
        fields.insert("title", FieldDefinition::new("Title"));
        fields.insert("body", FieldDefinition::new("Body"));
        fields
    }

    #[test]
    fn scoped_narrows_then_restores() {
        let full = fields();
        let mut ctx = RenderContext::new(full.clone());
        let narrowed = full.narrow(&["body".to_string()]);

        ctx.scoped(narrowed, |scoped| {
            assert_eq!(scoped.fields().len(), 1);
            assert!(scoped.fields().contains("body"));
        });

        assert_eq!(ctx.fields(), &full);
    }

    #[test]
    fn scoped_restores_on_error() {
        let full = fields();
        let mut ctx = RenderContext::new(full.clone());

        let result: Result<()> = ctx.scoped(FieldSet::new(), |_| {
            Err(ComposeError::Render("backend failure".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(ctx.fields(), &full);
    }

    #[test]
    fn scoped_restores_on_unwind() {
        let full = fields();
        let mut ctx = RenderContext::new(full.clone());

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            ctx.scoped(FieldSet::new(), |_| panic!("renderer blew up"));
        }));

        assert!(outcome.is_err());
        assert_eq!(ctx.fields(), &full);
    }

    #[test]
    fn text_renderer_labels_values() {
        let ctx = RenderContext::new(fields());
        let mut row = RowData::new();
        row.set("title", "Hello").set("body", "World");

        let mut renderer = TextRenderer::with_default();
        let markup = renderer.render(&ctx, &row).unwrap().unwrap();
        assert_eq!(markup, "Title: Hello\nBody: World");
    }

    #[test]
    fn text_renderer_reports_blank_output_as_none() {
        let ctx = RenderContext::new(fields());
        let mut row = RowData::new();
        row.set("title", "   ").set("body", "\x1b[2m \x1b[0m");

        let mut renderer = TextRenderer::with_default();
        assert!(renderer.render(&ctx, &row).unwrap().is_none());
    }

    #[test]
    fn text_renderer_skips_missing_values() {
        let ctx = RenderContext::new(fields());
        let mut row = RowData::new();
        row.set("body", "World");

        let mut renderer = TextRenderer::with_default();
        let markup = renderer.render(&ctx, &row).unwrap().unwrap();
        assert_eq!(markup, "Body: World");
    }
}
