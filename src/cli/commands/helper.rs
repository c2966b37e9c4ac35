use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::super::args::CommonArgs;
use super::{CommandResult, CommandSummary};
use crate::config::{Config, load_config};
use crate::store::FsStore;

/// Everything a command needs to look at tables on disk.
pub struct CommandContext {
    pub config: Config,
    pub base_dir: PathBuf,
    pub store: FsStore,
}

impl CommandContext {
    /// Load the config found from the working directory and apply CLI
    /// overrides.
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        Self::from_dir(&cwd, common)
    }

    pub fn from_dir(start_dir: &Path, common: &CommonArgs) -> Result<Self> {
        let loaded = load_config(start_dir)?;
        let mut config = loaded.config;

        if let Some(primary_locale) = &common.primary_locale {
            config.primary_locale = primary_locale.clone();
        }
        if let Some(root) = &common.root {
            config.localization_root = root.to_string_lossy().into_owned();
        }
        config.validate()?;

        if common.verbose {
            let source = if loaded.from_file {
                "config file"
            } else {
                "defaults"
            };
            tracing::debug!(source, base_dir = %loaded.base_dir.display(), "Loaded configuration");
        }

        let store = FsStore::with_ignores(&config.ignores);
        Ok(Self {
            config,
            base_dir: loaded.base_dir,
            store,
        })
    }
}

pub fn finish(summary: CommandSummary, error_count: usize, exit_on_errors: bool) -> CommandResult {
    CommandResult {
        summary,
        error_count,
        exit_on_errors,
    }
}
