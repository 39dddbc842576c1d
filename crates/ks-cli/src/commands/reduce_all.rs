use ks_pipeline::{Pipeline, ProcessRunner, resolve_windows};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReduceAllArgs;
use crate::commands::shared::warn_aborted;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `keystone reduce-all`.
pub fn handle(args: &ReduceAllArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let windows = resolve_windows::<&str>(&[])?;
    let release = ctx.release(args.release.as_deref());

    let mut runner = ProcessRunner;
    let mut pipeline = Pipeline::new(&ctx.config, &mut runner, args.overwrite);
    let run = Progress::run("reducing all regions", || {
        pipeline.reduce_all(&ctx.log, &ctx.catalog, release, &windows)
    })?;

    warn_aborted(&run);
    output(&run, flags.format)
}
