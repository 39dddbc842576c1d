use ks_pipeline::{CellStatus, Pipeline, ProcessRunner, resolve_windows};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RegionArgs;
use crate::commands::shared::region_selection;
use crate::context::AppContext;
use crate::output::output;

/// Handle `keystone plan`. Nothing is invoked and nothing is written.
pub fn handle(args: &RegionArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let windows = resolve_windows(&args.windows)?;
    let selection = region_selection(args, ctx)?;

    let mut runner = ProcessRunner;
    let pipeline = Pipeline::new(&ctx.config, &mut runner, args.overwrite);
    let plan = pipeline.plan_region(&ctx.log, &selection, &windows)?;

    tracing::info!(
        region = %plan.region,
        satisfied = plan.count(CellStatus::Satisfied),
        pending = plan.count(CellStatus::Pending),
        "plan"
    );
    output(&plan, flags.format)
}
