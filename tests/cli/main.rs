use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod stats;
mod sync;

const BIN_NAME: &str = "locsync";

/// Config used by most tests: English primary, French and German targets.
pub const CONFIG: &str = r#"{
  "primaryLocale": "en",
  "languagesInUse": ["en", "fr", "de"]
}"#;

pub const PRIMARY_TABLE: &str = "Key,SourceString,Comment\r\n\
                                 Hello,Hello,Greeting\r\n\
                                 Bye,Goodbye,\r\n";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
    /// Regex matching `project_dir`, for snapshot filters.
    root_pattern: String,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        let root_pattern = regex::escape(&project_dir.display().to_string());
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            root_pattern,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A project with [`CONFIG`] and the English `Game` table.
    pub fn with_project() -> Result<Self> {
        let test = Self::with_file(".locsyncrc.json", CONFIG)?;
        test.write_file("Localization/en/loc_Game_en.csv", PRIMARY_TABLE)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    /// Snapshot filters replacing the temporary project path with `[ROOT]`.
    pub fn filters(&self) -> Vec<(&str, &str)> {
        vec![(self.root_pattern.as_str(), "[ROOT]")]
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("LOCSYNC_LOG", "off"); // Keep log lines out of snapshots
        cmd
    }

    pub fn sync_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("sync");
        cmd
    }

    pub fn stats_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("stats");
        cmd
    }

    pub fn list_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("list");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}
