use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::ReduceSession(args) => commands::reduce_session::handle(&args, ctx, flags),
        Commands::ReduceAll(args) => commands::reduce_all::handle(&args, ctx, flags),
        Commands::ReduceRegion(args) => commands::reduce_region::handle(&args, ctx, flags),
        Commands::Plan(args) => commands::plan::handle(&args, ctx, flags),
        Commands::FillAll(args) => commands::fill_all::handle(&args, ctx, flags),
        Commands::MoveFiles(_) => {
            unreachable!("move-files is pre-dispatched in main")
        }
    }
}
