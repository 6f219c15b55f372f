pub type CmdResult<T> = mediaref::Result<(T, i32)>;

pub mod config;
pub mod presets;
pub mod rewrite;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (mediaref::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Relocate(args) => {
            crate::output::map_cmd_result_to_json(rewrite::run_preset("relocate-media", args))
        }
        crate::Commands::Update(args) => {
            crate::output::map_cmd_result_to_json(rewrite::run_preset("update-media", args))
        }
        crate::Commands::Run(args) => dispatch!(args, rewrite),
        crate::Commands::Presets(args) => dispatch!(args, presets),
        crate::Commands::Config(args) => dispatch!(args, config),
    }
}
