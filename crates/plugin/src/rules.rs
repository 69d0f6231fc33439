//! JSON rule-file loader.
//!
//! Rule documents are `{name, conditions, event}` JSON files ending in
//! `-rule.json` directly under a rules directory. Loading is an
//! explicit, caller-triggered step (no import-time side effects):
//! [`load_rules`] scans once and returns the parsed rule set together
//! with a per-file load report. Malformed files are logged and
//! skipped, never fatal to the load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Filename suffix that marks a rule document.
pub const RULE_FILE_SUFFIX: &str = "-rule.json";

// ── Error type ──────────────────────────────────────────────────────

/// Errors that can occur during rule loading.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/deserialization error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rule validation error (e.g. empty name).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

// ── Rule document ───────────────────────────────────────────────────

/// One parsed rule document.
///
/// `conditions` and `event` are opaque to this crate; the host's rule
/// engine interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFile {
    pub name: String,
    pub conditions: Value,
    pub event: Value,
}

// ── Load result types ───────────────────────────────────────────────

/// Outcome of loading a single file.
#[derive(Debug)]
pub struct LoadResult {
    /// Path to the file that was considered.
    pub path: PathBuf,
    /// Status of the load attempt.
    pub status: LoadStatus,
}

/// Status of a single file load attempt.
#[derive(Debug)]
pub enum LoadStatus {
    /// Rule was successfully loaded.
    Loaded { name: String },
    /// File was skipped (wrong suffix, subdirectory).
    Skipped { reason: String },
    /// Parse or validation error occurred.
    Failed { error: String },
}

/// Parsed rules plus the per-file report from one directory scan.
#[derive(Debug, Default)]
pub struct RuleSet {
    pub rules: Vec<RuleFile>,
    pub results: Vec<LoadResult>,
}

impl RuleSet {
    /// Number of files that failed to parse or validate.
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, LoadStatus::Failed { .. }))
            .count()
    }
}

// ── Loader ──────────────────────────────────────────────────────────

/// Scan a directory and load every `*-rule.json` document in it.
///
/// Subdirectories and files without the rule suffix are skipped.
/// Parse and validation errors are reported per-file and do not abort
/// the scan; only a failure to read the directory itself is an `Err`.
pub fn load_rules(dir: &Path) -> Result<RuleSet> {
    let mut set = RuleSet::default();

    let entries = fs::read_dir(dir)?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        let is_rule_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(RULE_FILE_SUFFIX))
            .unwrap_or(false);

        if !is_rule_file {
            set.results.push(LoadResult {
                path,
                status: LoadStatus::Skipped {
                    reason: "not a rule file".to_string(),
                },
            });
            continue;
        }

        match load_file(&path) {
            Ok(rule) => {
                info!(rule = %rule.name, path = %path.display(), "loaded rule");
                set.results.push(LoadResult {
                    path,
                    status: LoadStatus::Loaded {
                        name: rule.name.clone(),
                    },
                });
                set.rules.push(rule);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load rule file");
                set.results.push(LoadResult {
                    path,
                    status: LoadStatus::Failed {
                        error: e.to_string(),
                    },
                });
            }
        }
    }

    Ok(set)
}

/// Parse a single JSON file into a [`RuleFile`].
pub fn load_file(path: &Path) -> Result<RuleFile> {
    let contents = fs::read_to_string(path)?;
    let rule: RuleFile = serde_json::from_str(&contents)?;

    if rule.name.is_empty() {
        return Err(RuleError::Validation(
            "rule name must not be empty".to_string(),
        ));
    }

    Ok(rule)
}
