//! Rewrite engine: scan, read, transform, conditionally write.
//!
//! Given a `RewriteSpec` this module:
//! 1. Walks the root recursively (symlinked directories are not followed)
//! 2. Selects regular files whose suffix is in the extension set
//! 3. Decodes each file, applies the rules in order
//! 4. Writes the file back only when the text changed
//!
//! Any error aborts the walk. Files rewritten before the error stay rewritten.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::encoding::Encoding;
use crate::error::{Error, Result};
use crate::local_files::{EntryKind, FileSystem};
use crate::rules::{Applied, RuleSet, RuleWarning};

// ============================================================================
// Types
// ============================================================================

/// Dot-prefixed file suffixes eligible for rewriting (`.html`, `.css`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    pub fn new<I, S>(extensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for ext in extensions {
            let ext = ext.into();
            if !ext.starts_with('.') || ext.len() < 2 || ext[1..].contains('.') {
                return Err(Error::validation_invalid_argument(
                    "extensions",
                    format!("Extension '{}' must look like '.html'", ext),
                    None,
                    None,
                ));
            }
            set.insert(ext);
        }

        if set.is_empty() {
            return Err(Error::validation_invalid_argument(
                "extensions",
                "At least one extension is required",
                None,
                None,
            ));
        }

        Ok(Self(set))
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.0.contains(suffix)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Everything a rewrite run needs. No hidden module-level state.
#[derive(Debug, Clone)]
pub struct RewriteSpec {
    pub root: PathBuf,
    pub extensions: ExtensionSet,
    pub rules: RuleSet,
    pub encoding: Encoding,
    /// Globs matched against root-relative file paths (`node_modules/**`).
    pub exclude: Vec<String>,
}

impl RewriteSpec {
    pub fn new(root: impl Into<PathBuf>, extensions: ExtensionSet, rules: RuleSet) -> Self {
        Self {
            root: root.into(),
            extensions,
            rules,
            encoding: Encoding::default(),
            exclude: Vec::new(),
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude
            .iter()
            .any(|pattern| glob_match::glob_match(pattern, relative))
    }

    /// A directory is skipped whole when a `<prefix>/**` pattern covers it.
    fn is_excluded_dir(&self, relative: &str) -> bool {
        self.exclude.iter().any(|pattern| {
            pattern
                .strip_suffix("/**")
                .is_some_and(|prefix| glob_match::glob_match(prefix, relative))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// Overwrite changed files in place.
    Write,
    /// Compute edits without touching disk.
    DryRun,
}

/// A file whose content changed.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdit {
    /// File path relative to root.
    pub file: String,
    /// Number of replaced occurrences across all rules.
    pub replacements: usize,
}

/// Report of a rewrite run.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteResult {
    pub root: String,
    pub extensions: Vec<String>,
    pub encoding: Encoding,
    /// Eligible files that were read.
    pub files_scanned: usize,
    pub edits: Vec<FileEdit>,
    pub total_replacements: usize,
    pub total_files: usize,
    pub dry_run: bool,
    /// Whether changes were written to disk.
    pub applied: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RuleWarning>,
}

impl RewriteResult {
    fn empty(spec: &RewriteSpec, mode: RewriteMode) -> Self {
        Self {
            root: spec.root.display().to_string(),
            extensions: spec.extensions.iter().map(str::to_string).collect(),
            encoding: spec.encoding,
            files_scanned: 0,
            edits: Vec::new(),
            total_replacements: 0,
            total_files: 0,
            dry_run: mode == RewriteMode::DryRun,
            applied: false,
            warnings: spec.rules.warnings(),
        }
    }
}

// ============================================================================
// Transform
// ============================================================================

/// Run the rule set over one text blob. Pure; no I/O.
pub fn apply_rules(text: &str, rules: &RuleSet) -> Applied {
    rules.apply(text)
}

// ============================================================================
// Walk
// ============================================================================

/// Rewrite every eligible file under `spec.root`.
pub fn rewrite<F: FileSystem>(
    fs: &F,
    spec: &RewriteSpec,
    mode: RewriteMode,
) -> Result<RewriteResult> {
    spec.rules.validate()?;

    if !fs.exists(&spec.root) {
        return Err(Error::rewrite_root_not_found(&spec.root));
    }
    if !fs.is_dir(&spec.root) {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("{} is not a directory", spec.root.display()),
            None,
            None,
        ));
    }

    let mut result = RewriteResult::empty(spec, mode);
    walk_recursive(fs, &spec.root, spec, mode, &mut result)?;

    result.total_files = result.edits.len();
    result.applied = mode == RewriteMode::Write && !result.edits.is_empty();
    Ok(result)
}

fn walk_recursive<F: FileSystem>(
    fs: &F,
    dir: &Path,
    spec: &RewriteSpec,
    mode: RewriteMode,
    result: &mut RewriteResult,
) -> Result<()> {
    for entry in fs.list(dir)? {
        match entry.kind {
            EntryKind::Dir => {
                if spec.is_excluded_dir(&relative_path(&entry.path, &spec.root)) {
                    continue;
                }
                walk_recursive(fs, &entry.path, spec, mode, result)?
            }
            EntryKind::File => {
                let eligible = entry
                    .suffix()
                    .is_some_and(|suffix| spec.extensions.contains(&suffix));
                if !eligible {
                    continue;
                }

                let relative = relative_path(&entry.path, &spec.root);
                if spec.is_excluded(&relative) {
                    continue;
                }

                rewrite_file(fs, &entry.path, relative, spec, mode, result)?;
            }
            EntryKind::Other => {}
        }
    }

    Ok(())
}

fn rewrite_file<F: FileSystem>(
    fs: &F,
    path: &Path,
    relative: String,
    spec: &RewriteSpec,
    mode: RewriteMode,
    result: &mut RewriteResult,
) -> Result<()> {
    let bytes = fs.read(path)?;
    let original = spec.encoding.decode(&bytes, path)?;
    result.files_scanned += 1;

    let applied = apply_rules(&original, &spec.rules);
    if applied.text == original {
        return Ok(());
    }

    let encoded = spec.encoding.encode(&applied.text, path)?;
    if mode == RewriteMode::Write {
        fs.write(path, &encoded)?;
        crate::log_status!(
            "rewrite",
            "{} ({} replacement{})",
            relative,
            applied.replacements,
            if applied.replacements == 1 { "" } else { "s" }
        );
    }

    result.total_replacements += applied.replacements;
    result.edits.push(FileEdit {
        file: relative,
        replacements: applied.replacements,
    });

    Ok(())
}

fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// Tests
// ============================================================================
