use anyhow::Result;

use super::super::args::StatsCommand;
use super::helper::{CommandContext, finish};
use super::{CommandResult, CommandSummary};
use crate::stats::collect_stats;
use crate::sync::Synchronizer;

pub fn stats(cmd: StatsCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;

    let locales = Synchronizer::new(&ctx.config, &ctx.base_dir, &ctx.store).discover(
        cmd.filter.locale.as_deref(),
        cmd.filter.category.as_deref(),
    );

    let stats = collect_stats(&ctx.store, &locales, &ctx.config.status_markers);
    let error_count = stats.iter().filter(|s| s.result.is_err()).count();

    Ok(finish(CommandSummary::Stats(stats), error_count, true))
}
