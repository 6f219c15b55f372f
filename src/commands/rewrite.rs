use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use mediaref::defaults::{self, Defaults};
use mediaref::encoding::Encoding;
use mediaref::expand::expand_path;
use mediaref::io::read_spec_to_string;
use mediaref::local_files;
use mediaref::presets;
use mediaref::rewrite::{self, ExtensionSet, RewriteMode, RewriteResult, RewriteSpec};
use mediaref::rules::{RuleFile, RuleSet};
use mediaref::{log_status, Error};

use super::CmdResult;

/// Where and how to rewrite. Shared by every rewriting command.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Site root to rewrite (default: current directory)
    #[arg(long)]
    pub path: Option<String>,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Text encoding: utf-8, ascii, latin-1 (default from config)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Skip files whose root-relative path matches this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Rules JSON (inline, @file, or - for stdin)
    pub rules: String,

    /// Eligible extension, e.g. .html (repeatable; overrides rule file and config)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Serialize)]
pub struct RewriteOutput {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(flatten)]
    pub result: RewriteResult,
}

/// Run a built-in preset.
pub fn run_preset(name: &str, args: TargetArgs) -> CmdResult<RewriteOutput> {
    let preset = presets::find(name)?;
    let defaults = defaults::load_defaults();
    let extensions = defaults.extension_set()?;

    let result = execute(preset.rules, extensions, &defaults, args)?;

    Ok((
        RewriteOutput {
            command: format!("rewrite.{}", preset.name),
            preset: Some(preset.name.to_string()),
            result,
        },
        0,
    ))
}

/// Run a user-supplied rule file.
pub fn run(args: RunArgs) -> CmdResult<RewriteOutput> {
    let raw = read_spec_to_string(&args.rules)?;
    let rule_file = RuleFile::parse(&raw)?;
    let defaults = defaults::load_defaults();

    let extensions = if !args.extensions.is_empty() {
        ExtensionSet::new(args.extensions)?
    } else if let Some(list) = &rule_file.extensions {
        ExtensionSet::new(list.iter().cloned())?
    } else {
        defaults.extension_set()?
    };

    let result = execute(rule_file.rule_set(), extensions, &defaults, args.target)?;

    Ok((
        RewriteOutput {
            command: "rewrite.run".to_string(),
            preset: None,
            result,
        },
        0,
    ))
}

fn execute(
    rules: RuleSet,
    extensions: ExtensionSet,
    defaults: &Defaults,
    target: TargetArgs,
) -> mediaref::Result<RewriteResult> {
    let encoding = match target.encoding.as_deref() {
        Some(name) => Encoding::from_str(name)?,
        None => defaults.encoding,
    };

    let mut exclude = defaults.exclude.clone();
    exclude.extend(target.exclude);

    let root = resolve_root(target.path.as_deref())?;
    let mode = if target.dry_run {
        RewriteMode::DryRun
    } else {
        RewriteMode::Write
    };

    log_status!("rewrite", "Scanning {} ({})", root.display(), encoding.as_str());

    let spec = RewriteSpec::new(root, extensions, rules)
        .with_encoding(encoding)
        .with_exclude(exclude);

    rewrite::rewrite(&local_files::local(), &spec, mode)
}

fn resolve_root(path: Option<&str>) -> mediaref::Result<PathBuf> {
    match path {
        Some(p) => Ok(expand_path(p)),
        None => std::env::current_dir().map_err(|e| {
            Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
        }),
    }
}
