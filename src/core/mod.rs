// Public modules
pub mod defaults;
pub mod encoding;
pub mod error;
pub mod local_files;
pub mod presets;
pub mod rewrite;
pub mod rules;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
