use anyhow::Result;

use super::super::args::ListCommand;
use super::helper::{CommandContext, finish};
use super::{CommandResult, CommandSummary};
use crate::sync::Synchronizer;

pub fn list(cmd: ListCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;

    let locales = Synchronizer::new(&ctx.config, &ctx.base_dir, &ctx.store).discover(
        cmd.filter.locale.as_deref(),
        cmd.filter.category.as_deref(),
    );

    Ok(finish(CommandSummary::List(locales), 0, false))
}
