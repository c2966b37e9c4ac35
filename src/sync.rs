//! Reconciliation run across every category and language.
//!
//! For each primary-language table found on disk, every configured
//! secondary language and the debug locale get their table merged against
//! it. Failures are recorded per file and never stop the run.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::{Config, DEBUG_LOCALE};
use crate::core::{LocaleTable, MergeOptions, MergeStats, StatusCounts, csv, merge};
use crate::error::{LocError, LocResult};
use crate::locales::{LocaleInfo, Naming};
use crate::store::{FileFilter, TableStore, load_table};

/// Called after a completed pass that was allowed to write files.
pub type Observer = Box<dyn Fn(&SyncReport) + Send + Sync>;

/// Result of reconciling one secondary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSummary {
    pub stats: MergeStats,
    pub counts: StatusCounts,
    /// The rendered table differs from what was on disk.
    pub changed: bool,
    pub duplicate_keys: usize,
}

#[derive(Debug)]
pub struct TargetOutcome {
    pub locale_code: String,
    pub path: PathBuf,
    /// No table existed for this language; one was (or would be) created.
    pub created: bool,
    pub result: LocResult<TargetSummary>,
}

#[derive(Debug)]
pub struct CategoryReport {
    pub category: String,
    pub primary_path: PathBuf,
    /// Err when the primary table itself could not be loaded.
    pub result: LocResult<Vec<TargetOutcome>>,
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub categories: Vec<CategoryReport>,
    /// Files were written (false for a dry run).
    pub applied: bool,
}

impl SyncReport {
    /// Every primary table loaded. Failures on secondary files do not count.
    pub fn is_success(&self) -> bool {
        self.categories.iter().all(|c| c.result.is_ok())
    }

    pub fn targets(&self) -> impl Iterator<Item = (&CategoryReport, &TargetOutcome)> {
        self.categories.iter().flat_map(|category| {
            category
                .result
                .iter()
                .flatten()
                .map(move |target| (category, target))
        })
    }

    pub fn failed_file_count(&self) -> usize {
        let primaries = self.categories.iter().filter(|c| c.result.is_err()).count();
        let targets = self.targets().filter(|(_, t)| t.result.is_err()).count();
        primaries + targets
    }

    pub fn changed_file_count(&self) -> usize {
        self.targets()
            .filter(|(_, t)| matches!(&t.result, Ok(s) if s.changed))
            .count()
    }

    pub fn total_stats(&self) -> MergeStats {
        let mut total = MergeStats::default();
        for (_, target) in self.targets() {
            if let Ok(summary) = &target.result {
                total += summary.stats;
            }
        }
        total
    }
}

pub struct Synchronizer<'a, S: TableStore> {
    config: &'a Config,
    base_dir: &'a Path,
    store: &'a S,
    apply: bool,
    observers: Vec<Observer>,
}

impl<'a, S: TableStore> Synchronizer<'a, S> {
    pub fn new(config: &'a Config, base_dir: &'a Path, store: &'a S) -> Self {
        Self {
            config,
            base_dir,
            store,
            apply: false,
            observers: Vec::new(),
        }
    }

    /// Write merged tables back. Without this the run is a dry run.
    pub fn apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    /// Register a callback fired after each applied pass, e.g. to reload
    /// tables in a running application.
    pub fn subscribe(&mut self, observer: impl Fn(&SyncReport) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn naming(&self) -> Naming<'a> {
        Naming::new(self.config, self.base_dir)
    }

    pub fn file_filter(&self) -> FileFilter {
        FileFilter {
            extensions: self.config.extensions.clone(),
            prefix: self.config.filename_prefix.clone(),
            suffix: self.config.filename_suffix.clone(),
        }
    }

    /// Table files found under the configured roots, optionally narrowed to
    /// one locale and/or one category.
    pub fn discover(
        &self,
        locale_filter: Option<&str>,
        category_filter: Option<&str>,
    ) -> Vec<LocaleInfo> {
        let roots = self.config.search_roots(self.base_dir);
        let files = self.store.list_candidate_files(&roots, &self.file_filter());
        self.naming().available_locales(&files, locale_filter, category_filter)
    }

    pub fn run(&self) -> SyncReport {
        let locales = self.discover(None, None);
        let primary_locale = self.config.primary_locale.as_str();

        let primaries: Vec<&LocaleInfo> = locales
            .iter()
            .filter(|l| l.locale_code == primary_locale)
            .collect();
        if primaries.is_empty() {
            tracing::warn!(primary_locale, "No primary tables found");
        }

        let categories = primaries
            .into_iter()
            .map(|primary| self.sync_category(primary, &locales))
            .collect();

        let report = SyncReport {
            categories,
            applied: self.apply,
        };

        if self.apply {
            for observer in &self.observers {
                observer(&report);
            }
        }

        report
    }

    fn sync_category(&self, primary_info: &LocaleInfo, locales: &[LocaleInfo]) -> CategoryReport {
        let category = primary_info.category.clone();
        let primary_path = primary_info.file_path.clone();
        let markers = &self.config.status_markers;

        let primary = match load_table(self.store, &primary_path, markers) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(path = %primary_path.display(), error = %e, "Failed to load primary table");
                return CategoryReport {
                    category,
                    primary_path,
                    result: Err(e),
                };
            }
        };

        let targets: Vec<&str> = self
            .config
            .secondary_languages()
            .chain(std::iter::once(DEBUG_LOCALE))
            .collect();

        let outcomes = targets
            .par_iter()
            .map(|&lang| self.sync_target(&primary, primary_info, lang, locales))
            .collect();

        CategoryReport {
            category,
            primary_path,
            result: Ok(outcomes),
        }
    }

    fn sync_target(
        &self,
        primary: &LocaleTable,
        primary_info: &LocaleInfo,
        lang: &str,
        locales: &[LocaleInfo],
    ) -> TargetOutcome {
        let existing = locales
            .iter()
            .find(|l| l.category == primary_info.category && l.locale_code == lang);

        let (path, created) = match existing {
            Some(info) => (info.file_path.clone(), false),
            None => (self.naming().full_path(lang, &primary_info.category), true),
        };

        // Discovery can miss a file that is on disk; creating over it would
        // drop every translation it holds.
        let hidden = created && self.store.exists(&path);
        let result = if hidden {
            Err(LocError::Excluded(path.clone()))
        } else {
            self.reconcile_file(primary, &path, lang, created)
        };
        if let Err(e) = &result {
            tracing::warn!(path = %path.display(), error = %e, "Skipping table");
        }

        TargetOutcome {
            locale_code: lang.to_string(),
            path,
            created: created && !hidden,
            result,
        }
    }

    fn reconcile_file(
        &self,
        primary: &LocaleTable,
        path: &Path,
        lang: &str,
        created: bool,
    ) -> LocResult<TargetSummary> {
        let csv_options = self.config.csv_options();

        let previous = if created {
            tracing::debug!(path = %path.display(), "Creating table");
            if self.apply {
                self.store.write_text(path, &csv::empty_table())?;
            }
            None
        } else {
            if self.store.is_read_only(path) {
                return Err(LocError::ReadOnly(path.to_path_buf()));
            }
            Some(self.store.read_text(path)?)
        };

        let secondary = match &previous {
            Some(text) => csv::parse_table(text, &csv_options.markers)?,
            None => LocaleTable::default(),
        };

        let options = if lang == DEBUG_LOCALE {
            MergeOptions::debug(lang)
        } else {
            MergeOptions::translation(lang)
        };
        let merged = merge(primary, &secondary, &options);
        let text = csv::render_table(&merged.table, &csv_options);
        let changed = previous.as_deref() != Some(text.as_str());

        if self.apply && changed {
            self.store.write_text(path, &text)?;
            tracing::info!(path = %path.display(), "Updated table");
        }

        Ok(TargetSummary {
            stats: merged.stats,
            counts: merged.table.status_counts(),
            changed,
            duplicate_keys: secondary.duplicates().len(),
        })
    }
}
