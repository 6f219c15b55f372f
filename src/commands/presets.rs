use clap::Args;
use serde::Serialize;

use mediaref::defaults;
use mediaref::presets::{self, Preset};

use super::CmdResult;

#[derive(Args)]
pub struct PresetsArgs {
    /// Show a single preset by name
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PresetsOutput {
    command: String,
    extensions: Vec<String>,
    presets: Vec<Preset>,
}

pub fn run(args: PresetsArgs) -> CmdResult<PresetsOutput> {
    let presets = match args.name {
        Some(name) => vec![presets::find(&name)?],
        None => presets::all(),
    };

    Ok((
        PresetsOutput {
            command: "presets.list".to_string(),
            extensions: defaults::load_defaults().extensions,
            presets,
        },
        0,
    ))
}
