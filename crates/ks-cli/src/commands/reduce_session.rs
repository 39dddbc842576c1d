use ks_pipeline::{Pipeline, ProcessRunner, resolve_windows};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReduceSessionArgs;
use crate::commands::shared::warn_aborted;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `keystone reduce-session`.
pub fn handle(
    args: &ReduceSessionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let windows = resolve_windows::<&str>(&[])?;
    let release = ctx.release(args.release.as_deref());

    let mut runner = ProcessRunner;
    let mut pipeline = Pipeline::new(&ctx.config, &mut runner, args.overwrite);
    let run = Progress::run(&format!("reducing session {}", args.session), || {
        pipeline.reduce_session(&ctx.log, &ctx.catalog, args.session, release, &windows)
    })?;

    warn_aborted(&run);
    output(&run, flags.format)
}
