//! Row output store with content-hash change tracking.

mod core;

pub use core::{RowId, RowState, RowStore};
