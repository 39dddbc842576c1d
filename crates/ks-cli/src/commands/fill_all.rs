use ks_pipeline::{ProcessRunner, fill_all};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FillAllArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `keystone fill-all`.
pub fn handle(args: &FillAllArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut runner = ProcessRunner;
    let report = Progress::run("converting raw sessions", || {
        fill_all(&ctx.config, &ctx.log, &mut runner, args.overwrite)
    })?;
    output(&report, flags.format)
}
