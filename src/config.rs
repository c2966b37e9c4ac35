use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{CsvOptions, QuotingPolicy, StatusMarkers};

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

/// Locale code of the pseudo-localized debug tables.
pub const DEBUG_LOCALE: &str = "Debug";

/// Category used when a file name has no `Category_` part.
pub const DEFAULT_CATEGORY: &str = "Game";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    /// Every language that should have a table, primary included.
    #[serde(default = "default_languages_in_use")]
    pub languages_in_use: Vec<String>,
    /// Directory holding one sub-directory per locale.
    #[serde(default = "default_localization_root")]
    pub localization_root: String,
    /// Extra directories searched for existing tables.
    #[serde(default)]
    pub additional_roots: Vec<String>,
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
    #[serde(default)]
    pub filename_suffix: String,
    /// File extensions recognized as tables, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Extension used when a new table is created.
    #[serde(default = "default_primary_extension")]
    pub primary_extension: String,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub status_markers: StatusMarkers,
    #[serde(default)]
    pub quoting_policy: QuotingPolicy,
    #[serde(default = "default_preserve_deprecated_lines")]
    pub preserve_deprecated_lines: bool,
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_languages_in_use() -> Vec<String> {
    vec![default_primary_locale()]
}

fn default_localization_root() -> String {
    "./Localization".to_string()
}

fn default_filename_prefix() -> String {
    "loc_".to_string()
}

fn default_extensions() -> Vec<String> {
    ["csv", "txt"].map(String::from).to_vec()
}

fn default_primary_extension() -> String {
    "csv".to_string()
}

fn default_preserve_deprecated_lines() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_locale: default_primary_locale(),
            languages_in_use: default_languages_in_use(),
            localization_root: default_localization_root(),
            additional_roots: Vec::new(),
            filename_prefix: default_filename_prefix(),
            filename_suffix: String::new(),
            extensions: default_extensions(),
            primary_extension: default_primary_extension(),
            ignores: Vec::new(),
            status_markers: StatusMarkers::default(),
            quoting_policy: QuotingPolicy::default(),
            preserve_deprecated_lines: default_preserve_deprecated_lines(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, an empty
    /// primary locale or extension list, or status markers that would make
    /// the `Status` column ambiguous.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.primary_locale.trim().is_empty() {
            bail!("'primaryLocale' must not be empty");
        }
        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }
        if self.primary_extension.is_empty() {
            bail!("'primaryExtension' must not be empty");
        }
        if !self
            .extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&self.primary_extension))
        {
            bail!(
                "'extensions' must include the primary extension \"{}\"",
                self.primary_extension
            );
        }

        let markers = &self.status_markers;
        for (name, marker) in [
            ("deprecated", &markers.deprecated),
            ("modifiedLeft", &markers.modified_left),
            ("new", &markers.new),
        ] {
            if marker.is_empty() {
                bail!("Status marker '{}' must not be empty", name);
            }
        }

        Ok(())
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            markers: self.status_markers.clone(),
            quoting: self.quoting_policy,
            preserve_deprecated: self.preserve_deprecated_lines,
        }
    }

    /// Languages other than the primary that need a table.
    pub fn secondary_languages(&self) -> impl Iterator<Item = &str> {
        self.languages_in_use
            .iter()
            .map(String::as_str)
            .filter(|lang| *lang != self.primary_locale && *lang != DEBUG_LOCALE)
    }

    /// All directories searched for tables, relative to `base_dir`.
    pub fn search_roots(&self, base_dir: &Path) -> Vec<PathBuf> {
        std::iter::once(&self.localization_root)
            .chain(&self.additional_roots)
            .map(|root| base_dir.join(root).components().collect())
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
