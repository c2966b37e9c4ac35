use anyhow::Result;

use super::super::args::SyncCommand;
use super::helper::{CommandContext, finish};
use super::{CommandResult, CommandSummary};
use crate::sync::Synchronizer;

/// Reconcile every table. The exit code counts files that could not be
/// processed, secondary tables included, so it can be non-zero even when
/// [`SyncReport::is_success`](crate::sync::SyncReport::is_success) holds.
pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;

    let report = Synchronizer::new(&ctx.config, &ctx.base_dir, &ctx.store)
        .apply(cmd.apply)
        .run();

    let error_count = report.failed_file_count();
    Ok(finish(CommandSummary::Sync(report), error_count, true))
}
