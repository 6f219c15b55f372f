//! Bulk text rewriting: replace literal references across a directory tree.
//!
//! Walks every file under a root, picks the ones whose suffix is in the
//! eligible extension set, runs an ordered rule set over their decoded text and
//! writes back only the files whose content changed.

mod engine;

pub use engine::{
    apply_rules, rewrite, ExtensionSet, FileEdit, RewriteMode, RewriteResult, RewriteSpec,
};
