//! Reader and writer for the five-column table format.
//!
//! ```text
//! Key,SourceString,Comment,Primary,Status
//! "Menu_Start","Démarrer","Main menu button","Start",""
//! ```
//!
//! `Key` and `SourceString` are fixed to columns 0 and 1. `Comment`,
//! `Primary` and `Status` are looked up by header name and may be missing.
//! Output always uses CRLF line endings and no byte-order mark.

use serde::{Deserialize, Serialize};

use super::entry::{EntryStatus, LocalizationEntry};
use super::table::LocaleTable;
use crate::error::{LocError, LocResult};

pub const HEADER: &str = "Key,SourceString,Comment,Primary,Status";
pub const LINE_TERMINATOR: &str = "\r\n";

const KEY_COLUMN: &str = "Key";
const SOURCE_COLUMN: &str = "SourceString";
const COMMENT_COLUMN: &str = "Comment";
const PRIMARY_COLUMN: &str = "Primary";
const STATUS_COLUMN: &str = "Status";

/// Strings written to the `Status` column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMarkers {
    #[serde(default = "default_deprecated_marker")]
    pub deprecated: String,
    /// Written before the previous primary text of a modified entry.
    #[serde(default = "default_modified_left")]
    pub modified_left: String,
    #[serde(default = "default_modified_right")]
    pub modified_right: String,
    #[serde(default = "default_new_marker")]
    pub new: String,
}

fn default_deprecated_marker() -> String {
    "DEPRECATED".to_string()
}

fn default_modified_left() -> String {
    "MODIFIED from [".to_string()
}

fn default_modified_right() -> String {
    "]".to_string()
}

fn default_new_marker() -> String {
    "NEW".to_string()
}

impl Default for StatusMarkers {
    fn default() -> Self {
        Self {
            deprecated: default_deprecated_marker(),
            modified_left: default_modified_left(),
            modified_right: default_modified_right(),
            new: default_new_marker(),
        }
    }
}

impl StatusMarkers {
    /// Decode a `Status` cell into a status and, for modified entries, the
    /// previous primary text.
    pub fn decode(&self, cell: &str) -> (EntryStatus, String) {
        if has_marker(cell, &self.deprecated) {
            (EntryStatus::Deprecated, String::new())
        } else if has_marker(cell, &self.modified_left) {
            let rest = &cell[self.modified_left.len()..];
            let old_primary = rest.strip_suffix(self.modified_right.as_str()).unwrap_or(rest);
            (EntryStatus::Modified, old_primary.to_string())
        } else if has_marker(cell, &self.new) {
            (EntryStatus::New, String::new())
        } else {
            (EntryStatus::None, String::new())
        }
    }

    pub fn encode(&self, entry: &LocalizationEntry) -> String {
        match entry.status {
            EntryStatus::Deprecated => self.deprecated.clone(),
            EntryStatus::Modified => format!(
                "{}{}{}",
                self.modified_left, entry.old_primary, self.modified_right
            ),
            EntryStatus::New => self.new.clone(),
            EntryStatus::None => String::new(),
        }
    }
}

fn has_marker(cell: &str, marker: &str) -> bool {
    !marker.is_empty() && cell.starts_with(marker)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuotingPolicy {
    /// Quote only fields containing a quote, comma, CR or LF.
    Lazy,
    /// Quote every field.
    #[default]
    ForceQuoted,
}

/// Options shared by the reader and the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub markers: StatusMarkers,
    pub quoting: QuotingPolicy,
    /// Keep deprecated rows when writing.
    pub preserve_deprecated: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            markers: StatusMarkers::default(),
            quoting: QuotingPolicy::default(),
            preserve_deprecated: true,
        }
    }
}

// ============================================================
// Reading
// ============================================================

/// Parse a table file into entries, one per data row.
///
/// Rows with fewer than two cells or an empty key become placeholder entries
/// so that row positions are kept.
pub fn parse(text: &str, markers: &StatusMarkers) -> LocResult<Vec<LocalizationEntry>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rows = split_rows(text);

    let header = rows.first().map(Vec::as_slice).unwrap_or(&[]);
    check_header_cell(header, 0, KEY_COLUMN)?;
    check_header_cell(header, 1, SOURCE_COLUMN)?;

    let find_column = |name: &str| header.iter().position(|cell| cell == name);
    let comment_column = find_column(COMMENT_COLUMN);
    let primary_column = find_column(PRIMARY_COLUMN);
    let status_column = find_column(STATUS_COLUMN);

    let cell = |row: &[String], column: Option<usize>| -> String {
        column
            .and_then(|c| row.get(c))
            .map(String::as_str)
            .map(unescape)
            .unwrap_or_default()
    };

    let entries = rows[1..]
        .iter()
        .map(|row| {
            if row.len() < 2 || row[0].is_empty() {
                return LocalizationEntry::default();
            }

            let (status, old_primary) = markers.decode(&cell(row, status_column));
            LocalizationEntry {
                key: unescape(&row[0]),
                translation: unescape(&row[1]),
                comment: cell(row, comment_column),
                primary: cell(row, primary_column),
                old_primary,
                status,
            }
        })
        .collect();

    Ok(entries)
}

/// Parse straight into a [`LocaleTable`].
pub fn parse_table(text: &str, markers: &StatusMarkers) -> LocResult<LocaleTable> {
    parse(text, markers).map(LocaleTable::new)
}

fn check_header_cell(header: &[String], column: usize, expected: &'static str) -> LocResult<()> {
    match header.get(column) {
        Some(cell) if cell == expected => Ok(()),
        other => {
            let found = other.cloned().unwrap_or_default();
            tracing::error!(column, expected, found = %found, "Invalid table header");
            Err(LocError::InvalidHeader {
                column,
                expected,
                found,
            })
        }
    }
}

/// Split text into rows of cells, honoring RFC-4180 quoting.
///
/// Quoted cells may span lines and contain commas; `""` inside quotes is a
/// literal quote. A line terminator at the very end does not open a new row.
fn split_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row_started = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        row_started = true;

        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                row_started = false;
            }
            _ => field.push(c),
        }
    }

    if row_started {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Replace backslash escape sequences with the characters they stand for.
fn unescape(field: &str) -> String {
    if !field.contains('\\') {
        return field.to_string();
    }

    let mut result = String::with_capacity(field.len());
    let mut chars = field.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            _ => {
                result.push('\\');
                continue;
            }
        };
        chars.next();
        result.push(replacement);
    }
    result
}

// ============================================================
// Writing
// ============================================================

/// Render entries as table text, header included.
pub fn render(entries: &[LocalizationEntry], options: &CsvOptions) -> String {
    let force = options.quoting == QuotingPolicy::ForceQuoted;

    let mut out = String::with_capacity(HEADER.len() + entries.len() * 64);
    out.push_str(HEADER);
    out.push_str(LINE_TERMINATOR);

    for entry in entries {
        if entry.status == EntryStatus::Deprecated && !options.preserve_deprecated {
            continue;
        }

        let status = options.markers.encode(entry);
        let fields = [
            entry.key.as_str(),
            entry.translation.as_str(),
            entry.comment.as_str(),
            entry.primary.as_str(),
            status.as_str(),
        ];
        let line: Vec<String> = fields.iter().map(|f| quote_field(f, force)).collect();
        out.push_str(&line.join(","));
        out.push_str(LINE_TERMINATOR);
    }

    out
}

/// Render a whole table.
pub fn render_table(table: &LocaleTable, options: &CsvOptions) -> String {
    render(table.entries(), options)
}

/// Text of a freshly created table with no rows.
pub fn empty_table() -> String {
    format!("{HEADER}{LINE_TERMINATOR}")
}

fn quote_field(field: &str, force: bool) -> String {
    let needs_quotes = field.contains(['"', '\r', '\n', ',']);
    let escaped = field.replace('"', "\"\"");
    if force || needs_quotes {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}
