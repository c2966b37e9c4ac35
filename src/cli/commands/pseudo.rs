use anyhow::Result;

use super::super::args::PseudoCommand;
use super::helper::finish;
use super::{CommandResult, CommandSummary, PseudoLine};
use crate::core::pseudo_translate;

pub fn pseudo(cmd: PseudoCommand) -> Result<CommandResult> {
    let lines = cmd
        .texts
        .into_iter()
        .map(|source| PseudoLine {
            pseudo: pseudo_translate(&source),
            source,
        })
        .collect();

    Ok(finish(CommandSummary::Pseudo(lines), 0, false))
}
