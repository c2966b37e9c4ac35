//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! # Returns
//! - `Ok(CommandResult)` with the command summary and error count
//! - `Err` if the command fails (e.g., invalid config file)

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{init::init, list::list, pseudo::pseudo, stats::stats, sync::sync},
};
use anyhow::Result;

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Stats(cmd)) => stats(cmd),
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Pseudo(cmd)) => pseudo(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
