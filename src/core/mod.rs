//! Reconciliation engine.
//!
//! Everything in here is a pure function of its inputs: no file access, no
//! global settings. The orchestrator in [`crate::sync`] does the I/O.
//!
//! - `entry`: one table row and its status
//! - `table`: ordered rows plus key index
//! - `csv`: reading and writing the table format
//! - `pseudo`: debug-locale text generation
//! - `merge`: primary/secondary reconciliation

pub mod csv;
pub mod entry;
pub mod merge;
pub mod pseudo;
pub mod table;

pub use csv::{CsvOptions, QuotingPolicy, StatusMarkers};
pub use entry::{EntryStatus, LocalizationEntry};
pub use merge::{MergeOptions, MergeStats, Merged, merge};
pub use pseudo::pseudo_translate;
pub use table::{DuplicateKey, LocaleTable, StatusCounts};
