//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync`: Reconcile every secondary and debug table against the primary
//! - `stats`: Show entry counts per status for each table
//! - `list`: List discovered tables
//! - `pseudo`: Print the debug-locale text for a string
//! - `init`: Initialize locsync configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Sync(cmd)) => cmd.common.verbose,
            Some(Command::Stats(cmd)) => cmd.common.verbose,
            Some(Command::List(cmd)) => cmd.common.verbose,
            Some(Command::Pseudo(_)) | Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that read tables.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Localization root directory (overrides config file)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write tables (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

/// Narrow the tables a command looks at.
#[derive(Debug, Clone, Args)]
pub struct TableFilterArgs {
    /// Only tables of this locale
    #[arg(long)]
    pub locale: Option<String>,

    /// Only tables of this category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub filter: TableFilterArgs,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub filter: TableFilterArgs,
}

#[derive(Debug, Args)]
pub struct PseudoCommand {
    /// Text to transform
    #[arg(required = true)]
    pub texts: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bring every translation table in line with the primary language
    Sync(SyncCommand),
    /// Show how many entries are new, modified or deprecated in each table
    Stats(StatsCommand),
    /// List the translation tables found under the localization roots
    List(ListCommand),
    /// Print the debug-locale version of a string
    Pseudo(PseudoCommand),
    /// Initialize a new .locsyncrc.json configuration file
    Init,
}
