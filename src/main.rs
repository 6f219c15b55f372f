use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{config, presets, rewrite};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "mediaref")]
#[command(version = VERSION)]
#[command(about = "Rewrite media path and URL references across a static site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move logos and flyers into assets/media subdirectories
    Relocate(rewrite::TargetArgs),
    /// Rename assets/img references to assets/media
    Update(rewrite::TargetArgs),
    /// Apply a custom rule file
    Run(rewrite::RunArgs),
    /// List built-in presets and their replacement tables
    Presets(presets::PresetsArgs),
    /// Manage global mediaref configuration
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, exit_code) = commands::run_json(cli.command);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
