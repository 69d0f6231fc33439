//! Plugin-side contract for the external rule-engine host.
//!
//! This crate owns the half of the host contract that plugins must
//! satisfy:
//! - `Almanac`, `Fact`, and `Operator` traits plus the `Plugin` descriptor
//! - `FactParams` (typed fact options) and `FactOutcome` (tagged results)
//! - `PluginError` with the host's severity levels and translation hook
//! - JSON rule-file loading with per-file load reports
//!
//! The host rule engine itself is not implemented here; plugins only
//! consume the almanac and return results the host knows how to read.

pub mod error;
pub mod outcome;
pub mod rules;
pub mod traits;

pub use error::{translate_error, ErrorDetails, PluginError, Severity};
pub use outcome::{now_iso, FactOutcome, Failure, Finding, Success};
pub use traits::{
    file_content, Almanac, ErrorHook, Fact, FactParams, Operator, Plugin, DEFAULT_TIMEOUT_MS,
};
