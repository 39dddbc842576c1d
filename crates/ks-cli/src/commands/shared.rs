use anyhow::bail;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use ks_obslog::dates::parse_log_date;
use ks_obslog::{DateWindow, Selection};
use ks_pipeline::RunReport;

use crate::cli::root_commands::RegionArgs;
use crate::context::AppContext;

/// Selection for a single-region command; missing dates fall back to the
/// configured window.
pub fn region_selection(args: &RegionArgs, ctx: &AppContext) -> anyhow::Result<Selection> {
    let defaults = &ctx.config.selection;
    let start = date_bound(args.start_date.as_deref(), defaults.start_date)?;
    let end = date_bound(args.end_date.as_deref(), defaults.end_date)?;
    if start > end {
        bail!("start date {start} is after end date {end}");
    }

    Ok(Selection {
        region: args.region.clone(),
        dates: DateWindow::new(start, end),
        release: ctx.release(args.release.as_deref()).to_string(),
    })
}

fn date_bound(value: Option<&str>, default: NaiveDate) -> anyhow::Result<NaiveDateTime> {
    match value {
        Some(value) => Ok(parse_log_date(value)?),
        None => Ok(default.and_time(NaiveTime::MIN)),
    }
}

pub fn warn_aborted(run: &RunReport) {
    for region in run.aborted() {
        tracing::warn!(
            region = %region.region,
            error = region.error.as_deref().unwrap_or_default(),
            "region was skipped"
        );
    }
}
