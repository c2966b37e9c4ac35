//! Mapping between table files and the (category, locale) they hold.
//!
//! Files are named `{prefix}{Category}_{locale}{suffix}.{ext}` and live in
//! `{localizationRoot}/{locale}/`. A file name without a category part
//! belongs to the default category.

use std::path::{Path, PathBuf};

use crate::config::{Config, DEBUG_LOCALE, DEFAULT_CATEGORY};

/// One discovered table file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocaleInfo {
    pub category: String,
    pub locale_code: String,
    pub display_name: String,
    pub file_path: PathBuf,
}

/// Builds and reads table file names according to the configuration.
#[derive(Debug, Clone, Copy)]
pub struct Naming<'a> {
    config: &'a Config,
    base_dir: &'a Path,
}

impl<'a> Naming<'a> {
    pub fn new(config: &'a Config, base_dir: &'a Path) -> Self {
        Self { config, base_dir }
    }

    /// File name for a new table, e.g. `loc_Game_fr.csv`.
    pub fn file_name(&self, locale_code: &str, category: &str) -> String {
        let path = format!(
            "{}{}_{}{}.{}",
            self.config.filename_prefix,
            category,
            locale_code,
            self.config.filename_suffix,
            self.config.primary_extension
        );
        tracing::trace!(path = %path, "Built file name");
        path
    }

    /// Full path for a new table, e.g. `Localization/fr/loc_Game_fr.csv`.
    pub fn full_path(&self, locale_code: &str, category: &str) -> PathBuf {
        let path: PathBuf = self
            .base_dir
            .join(&self.config.localization_root)
            .join(locale_code)
            .join(self.file_name(locale_code, category))
            .components()
            .collect();
        tracing::trace!(path = %path.display(), "Built full path");
        path
    }

    /// Base file name with the configured prefix and suffix removed.
    pub fn strip_affixes<'p>(&self, path: &'p Path) -> &'p str {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let stem = stem
            .strip_prefix(self.config.filename_prefix.as_str())
            .unwrap_or(stem);
        stem.strip_suffix(self.config.filename_suffix.as_str())
            .unwrap_or(stem)
    }

    /// Describe the table stored at `path`.
    pub fn locale_info(&self, path: &Path) -> LocaleInfo {
        let (category, locale_code) = split_category_and_locale(self.strip_affixes(path));
        LocaleInfo {
            display_name: display_name(locale_code),
            category: category.to_string(),
            locale_code: locale_code.to_string(),
            file_path: path.to_path_buf(),
        }
    }

    /// Describe every file, keeping only those matching the given filters.
    pub fn available_locales(
        &self,
        files: &[PathBuf],
        locale_filter: Option<&str>,
        category_filter: Option<&str>,
    ) -> Vec<LocaleInfo> {
        let mut locales: Vec<LocaleInfo> = files
            .iter()
            .map(|path| self.locale_info(path))
            .filter(|info| locale_filter.is_none_or(|l| info.locale_code == l))
            .filter(|info| category_filter.is_none_or(|c| info.category == c))
            .collect();
        locales.sort();
        locales
    }
}

/// Split `Category_locale` at the last underscore.
pub fn split_category_and_locale(name: &str) -> (&str, &str) {
    match name.rsplit_once('_') {
        Some((category, locale)) => (category, locale),
        None => (DEFAULT_CATEGORY, name),
    }
}

/// Native name of a language, for display only.
pub fn display_name(locale_code: &str) -> String {
    if locale_code.eq_ignore_ascii_case(DEBUG_LOCALE) {
        return DEBUG_LOCALE.to_string();
    }

    let language = locale_code
        .split(['-', '_'])
        .next()
        .unwrap_or(locale_code)
        .to_ascii_lowercase();

    let name = match language.as_str() {
        "ar" => "العربية",
        "cs" => "Čeština",
        "da" => "Dansk",
        "de" => "Deutsch",
        "en" => "English",
        "es" => "Español",
        "fi" => "Suomi",
        "fr" => "Français",
        "hu" => "Magyar",
        "it" => "Italiano",
        "ja" => "日本語",
        "ko" => "한국어",
        "nl" => "Nederlands",
        "no" | "nb" => "Norsk",
        "pl" => "Polski",
        "pt" => "Português",
        "ru" => "Русский",
        "sv" => "Svenska",
        "tr" => "Türkçe",
        "uk" => "Українська",
        "zh" | "cn" => "中文",
        _ => return locale_code.to_string(),
    };
    name.to_string()
}
