mod types;

pub use types::{ComposeError, Result};
