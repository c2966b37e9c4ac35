use std::{fs, path::Path};

use anyhow::Result;

use super::helper::finish;
use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write a default config file into the working directory.
///
/// An existing file is never overwritten; that case is reported as an error.
pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(finish(
            CommandSummary::Init(InitSummary { created: false }),
            1,
            true,
        ));
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(finish(
        CommandSummary::Init(InitSummary { created: true }),
        0,
        true,
    ))
}
