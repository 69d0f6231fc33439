//! Fact, operator, and almanac traits plus the plugin descriptor.
//!
//! Facts are async and may suspend at the almanac lookup and at one
//! outbound HTTP call; operators are synchronous, pure, and never
//! fail. The host resolves both by their registered names.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::PluginError;
use crate::outcome::FactOutcome;

/// Default per-request HTTP timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

// ── Fact params ─────────────────────────────────────────────────────

/// Recognized fact options, deserialized from the host's rule params.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactParams {
    /// Target endpoint for outbound HTTP calls.
    pub url: Option<String>,
    /// HTTP method; the default is per-fact (POST for externalApiCall,
    /// GET for responseTime).
    pub method: Option<String>,
    /// Extra request headers.
    pub headers: HashMap<String, String>,
    /// Per-request timeout in milliseconds.
    pub timeout: Option<u64>,
    /// Forward the extracted value in the outbound request body.
    pub include_value: bool,
    /// Extraction pattern (first capture group wins).
    pub regex: Option<String>,
    /// Named scan patterns; ordered so findings are deterministic.
    pub patterns: Option<BTreeMap<String, String>>,
}

impl FactParams {
    /// Parse params from the raw JSON the host hands over.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    /// Request timeout, defaulting to [`DEFAULT_TIMEOUT_MS`].
    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_millis(self.timeout.unwrap_or(DEFAULT_TIMEOUT_MS))
    }
}

// ── Almanac (consumed, not implemented here) ────────────────────────

/// The host's fact-resolution accessor.
///
/// Resolves previously-computed facts (e.g. `fileData`) to JSON
/// values; `None` means the fact is absent or unresolved.
#[async_trait]
pub trait Almanac: Send + Sync {
    async fn fact_value(&self, name: &str) -> Option<Value>;
}

/// Extract the `fileContent` string from a `fileData` almanac value.
pub fn file_content(file_data: &Value) -> Option<&str> {
    file_data.get("fileContent").and_then(Value::as_str)
}

// ── Fact / operator traits ──────────────────────────────────────────

/// A named async data-gathering function.
///
/// Expected negatives (missing upstream data, no regex match) are
/// `Ok` failures; operational problems (transport errors, bad
/// patterns) raise [`PluginError`].
#[async_trait]
pub trait Fact: Send + Sync {
    /// Name the host registers this fact under.
    fn name(&self) -> &'static str;

    async fn evaluate(
        &self,
        params: &FactParams,
        almanac: &dyn Almanac,
    ) -> Result<FactOutcome, PluginError>;
}

/// A named synchronous predicate over a prior fact's result.
///
/// Operators never fail: any malformed input degrades to `false`.
pub trait Operator: Send + Sync {
    /// Name the host registers this operator under.
    fn name(&self) -> &'static str;

    fn evaluate(&self, fact_result: &Value, threshold: &Value) -> bool;
}

// ── Plugin descriptor ───────────────────────────────────────────────

/// Hook invoked by the host when a fact or operator raises.
pub type ErrorHook = fn(&(dyn std::error::Error + 'static)) -> PluginError;

/// Static record a plugin registers with the host.
pub struct Plugin {
    pub name: &'static str,
    /// Sourced from the plugin crate's own package metadata.
    pub version: &'static str,
    pub facts: Vec<Arc<dyn Fact>>,
    pub operators: Vec<Arc<dyn Operator>>,
    pub on_error: Option<ErrorHook>,
}

impl Plugin {
    /// Look up a fact by its registered name.
    pub fn fact(&self, name: &str) -> Option<Arc<dyn Fact>> {
        self.facts.iter().find(|f| f.name() == name).cloned()
    }

    /// Look up an operator by its registered name.
    pub fn operator(&self, name: &str) -> Option<Arc<dyn Operator>> {
        self.operators.iter().find(|o| o.name() == name).cloned()
    }
}
