//! locsync - localization table reconciliation
//!
//! locsync keeps per-language CSV translation tables in line with the
//! table of the primary language. New keys are added, changed source
//! strings are flagged, removed keys are kept at the end as deprecated,
//! and a pseudo-translated debug table is regenerated on every run.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Table model, CSV codec, pseudo-translation and merge engine
//! - `error`: Error type shared by the engine and the store
//! - `locales`: Table file naming and discovery
//! - `stats`: Per-table status counts
//! - `store`: Filesystem access
//! - `sync`: Reconciliation across every category and language

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod locales;
pub mod stats;
pub mod store;
pub mod sync;
