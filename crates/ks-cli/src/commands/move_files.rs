use ks_config::KeystoneConfig;
use ks_pipeline::rescue_misplaced;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MoveFilesArgs;
use crate::output::output;

/// Handle `keystone move-files`.
pub fn handle(
    args: &MoveFilesArgs,
    config: &KeystoneConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scan_dir = args
        .dir
        .clone()
        .unwrap_or_else(|| config.paths.work_root.join(&args.region));

    let report = rescue_misplaced(&scan_dir, &args.region, args.session, &args.prefix)?;
    if !report.failed.is_empty() {
        tracing::warn!(failed = report.failed.len(), "some files could not be moved");
    }
    output(&report, flags.format)
}
