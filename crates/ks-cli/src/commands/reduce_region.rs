use ks_pipeline::{Pipeline, ProcessRunner, resolve_windows, resolver};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RegionArgs;
use crate::commands::shared::region_selection;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `keystone reduce-region`.
pub fn handle(args: &RegionArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // Unknown windows fail here, before anything is invoked.
    let windows = resolve_windows(&args.windows)?;
    let selection = region_selection(args, ctx)?;

    let mut runner = ProcessRunner;
    let mut pipeline = Pipeline::new(&ctx.config, &mut runner, args.overwrite);
    let region_root = pipeline.region_root(&selection.region);
    resolver::ensure_output_directory(&region_root)?;

    let report = Progress::run(&format!("reducing {}", selection.region), || {
        pipeline.reduce_region(&ctx.log, &selection, &windows, &region_root)
    })?;

    output(&report, flags.format)
}
