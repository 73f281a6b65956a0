//! Region rendering: the shared context, field scoping, and the renderer
//! collaborator seam.

mod core;

pub use core::{
    Markup, RegionRenderer, RenderContext, ScopedFields, TextRenderer, TextRendererSettings,
};
