//! Report formatting and printing utilities.
//!
//! Separate from the engine so locsync can be used as a library without
//! a terminal attached.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, InitSummary, PseudoLine};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{EntryStatus, MergeStats};
use crate::error::LocError;
use crate::locales::LocaleInfo;
use crate::stats::TableStats;
use crate::sync::{SyncReport, TargetOutcome};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_result(result, verbose, &mut writer);
}

fn write_result<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Sync(report) => write_sync(report, verbose, writer),
        CommandSummary::Stats(stats) => write_stats(stats, writer),
        CommandSummary::List(locales) => write_list(locales, writer),
        CommandSummary::Pseudo(lines) => write_pseudo(lines, verbose, writer),
        CommandSummary::Init(summary) => write_init(summary, writer),
    }
}

fn write_sync<W: Write>(report: &SyncReport, verbose: bool, writer: &mut W) {
    if report.categories.is_empty() {
        let _ = writeln!(
            writer,
            "{} No primary tables found. Check `primaryLocale` and `localizationRoot` in {}.",
            "warning:".yellow().bold(),
            CONFIG_FILE_NAME
        );
        return;
    }

    for category in &report.categories {
        let _ = writeln!(
            writer,
            "{} {}",
            category.category.bold(),
            format!("({})", category.primary_path.display()).dimmed()
        );

        let targets = match &category.result {
            Ok(targets) => targets,
            Err(e) => {
                write_error_line(e, writer);
                continue;
            }
        };

        let width = targets
            .iter()
            .map(|t| UnicodeWidthStr::width(t.locale_code.as_str()))
            .max()
            .unwrap_or(0);

        for target in targets {
            write_target(target, report.applied, verbose, width, writer);
        }
    }

    let _ = writeln!(writer);
    write_sync_summary(report, writer);
}

fn write_target<W: Write>(
    target: &TargetOutcome,
    applied: bool,
    verbose: bool,
    width: usize,
    writer: &mut W,
) {
    let padding = width.saturating_sub(UnicodeWidthStr::width(target.locale_code.as_str()));
    let locale = format!("{}{:padding$}", target.locale_code, "", padding = padding);

    let summary = match &target.result {
        Ok(summary) => summary,
        Err(e) => {
            let _ = writeln!(
                writer,
                "  {} {} {}: {}",
                locale,
                FAILURE_MARK.red(),
                e.kind().red(),
                e
            );
            return;
        }
    };

    if !summary.changed && !verbose {
        return;
    }

    let state = match (summary.changed, target.created, applied) {
        (false, _, _) => "unchanged".dimmed(),
        (true, true, true) => "created".green(),
        (true, false, true) => "updated".green(),
        (true, true, false) => "would create".yellow(),
        (true, false, false) => "would update".yellow(),
    };

    let _ = writeln!(
        writer,
        "  {} {}{}",
        locale,
        state,
        stats_suffix(&summary.stats)
    );
    if summary.duplicate_keys > 0 {
        let _ = writeln!(
            writer,
            "  {:width$} {} {} duplicate key(s) ignored",
            "",
            "note:".bold(),
            summary.duplicate_keys,
            width = width
        );
    }
    if verbose {
        let _ = writeln!(
            writer,
            "  {:width$} {}",
            "",
            target.path.display().to_string().dimmed(),
            width = width
        );
    }
}

fn write_error_line<W: Write>(error: &LocError, writer: &mut W) {
    let _ = writeln!(
        writer,
        "  {} {}: {}",
        FAILURE_MARK.red(),
        error.kind().red(),
        error
    );
}

/// ` (+a new, ~m modified, -d deprecated)`, or nothing when no entry moved.
fn stats_suffix(stats: &MergeStats) -> String {
    if stats.is_empty() {
        return String::new();
    }
    format!(
        " (+{} new, ~{} modified, -{} deprecated)",
        stats.added, stats.modified, stats.deprecated
    )
}

fn write_sync_summary<W: Write>(report: &SyncReport, writer: &mut W) {
    let failed = report.failed_file_count();
    let changed = report.changed_file_count();
    let totals = report.total_stats();

    if changed == 0 {
        if failed == 0 {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                "All tables are up to date".green()
            );
        }
    } else if report.applied {
        let _ = writeln!(
            writer,
            "{} {} {} table(s){}",
            SUCCESS_MARK.green(),
            "Updated".green().bold(),
            changed,
            stats_suffix(&totals)
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} table(s){}",
            "Would update".yellow().bold(),
            changed,
            stats_suffix(&totals)
        );
        let _ = writeln!(writer, "Run with {} to write these changes.", "--apply".cyan());
    }

    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} table(s) could not be processed",
            FAILURE_MARK.red(),
            failed
        );
    }
}

fn write_stats<W: Write>(stats: &[TableStats], writer: &mut W) {
    if stats.is_empty() {
        let _ = writeln!(writer, "No tables found.");
        return;
    }

    let name_width = stats
        .iter()
        .map(|s| UnicodeWidthStr::width(s.info.display_name.as_str()))
        .max()
        .unwrap_or(0);
    let category_width = stats
        .iter()
        .map(|s| UnicodeWidthStr::width(s.info.category.as_str()))
        .max()
        .unwrap_or(0);

    for table in stats {
        let label = table_label(&table.info, category_width, name_width);
        match &table.result {
            Ok(counts) => {
                let columns: Vec<String> = EntryStatus::ALL
                    .iter()
                    .map(|status| {
                        let n = counts.counts.get(status).copied().unwrap_or(0);
                        format!("{} {:>4}", status, n)
                    })
                    .collect();
                let _ = writeln!(
                    writer,
                    "{}  {:>5} entries  {}",
                    label,
                    counts.entries,
                    columns.join("  ")
                );
                if counts.duplicate_keys > 0 {
                    let _ = writeln!(
                        writer,
                        "  {} {} duplicate key(s)",
                        "note:".bold(),
                        counts.duplicate_keys
                    );
                }
            }
            Err(e) => {
                let _ = writeln!(
                    writer,
                    "{}  {} {}: {}",
                    label,
                    FAILURE_MARK.red(),
                    e.kind().red(),
                    e
                );
            }
        }
    }
}

fn write_list<W: Write>(locales: &[LocaleInfo], writer: &mut W) {
    if locales.is_empty() {
        let _ = writeln!(writer, "No tables found.");
        return;
    }

    let name_width = locales
        .iter()
        .map(|l| UnicodeWidthStr::width(l.display_name.as_str()))
        .max()
        .unwrap_or(0);
    let category_width = locales
        .iter()
        .map(|l| UnicodeWidthStr::width(l.category.as_str()))
        .max()
        .unwrap_or(0);

    for info in locales {
        let _ = writeln!(
            writer,
            "{}  {}",
            table_label(info, category_width, name_width),
            info.file_path.display().to_string().dimmed()
        );
    }
}

/// `Category  code  Display name` padded to the given display widths.
fn table_label(info: &LocaleInfo, category_width: usize, name_width: usize) -> String {
    let category_pad = category_width.saturating_sub(UnicodeWidthStr::width(info.category.as_str()));
    let name_pad = name_width.saturating_sub(UnicodeWidthStr::width(info.display_name.as_str()));
    format!(
        "{}{:cp$}  {:<6} {}{:np$}",
        info.category.bold(),
        "",
        info.locale_code,
        info.display_name,
        "",
        cp = category_pad,
        np = name_pad
    )
}

fn write_pseudo<W: Write>(lines: &[PseudoLine], verbose: bool, writer: &mut W) {
    for line in lines {
        if verbose {
            let _ = writeln!(writer, "{} {} {}", line.source, "->".dimmed(), line.pseudo);
        } else {
            let _ = writeln!(writer, "{}", line.pseudo);
        }
    }
}

fn write_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} already exists",
            FAILURE_MARK.red(),
            CONFIG_FILE_NAME
        );
    }
}
