use crate::locales::LocaleInfo;
use crate::stats::TableStats;
use crate::sync::SyncReport;

#[derive(Debug)]
pub enum CommandSummary {
    Sync(SyncReport),
    Stats(Vec<TableStats>),
    List(Vec<LocaleInfo>),
    Pseudo(Vec<PseudoLine>),
    Init(InitSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoLine {
    pub source: String,
    pub pseudo: String,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running locsync commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Number of tables that could not be processed.
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0.
    pub exit_on_errors: bool,
}
