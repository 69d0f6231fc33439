//! Tagged fact results and the finding record.
//!
//! Facts return a [`FactOutcome`]: either `Success` with the fields
//! the particular fact populates, or `Failure` carrying exactly one
//! of `error` (operational failure reported as data) or `reason`
//! (expected negative such as "No match found"). The serialized shape
//! uses the host's camelCase keys.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// ISO-8601 timestamp at millisecond precision with a `Z` suffix.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ── Finding ─────────────────────────────────────────────────────────

/// One detected sensitive-pattern match in scanned content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Pattern name that matched (e.g. `apiKey`).
    #[serde(rename = "type")]
    pub kind: String,
    /// 1-based line number of the match start.
    pub line: u64,
    /// The matched text.
    #[serde(rename = "match")]
    pub matched: String,
}

// ── Fact outcome ────────────────────────────────────────────────────

/// Result of a fact invocation, in the host's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FactOutcome {
    Success(Success),
    Failure(Failure),
}

/// Successful fact result. Each fact populates its own subset of the
/// optional fields; unset fields are omitted from the wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Success {
    /// Always `true`.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_response: Option<Value>,
    /// Elapsed wall-clock milliseconds (responseTime fact).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    /// HTTP status code (responseTime fact).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<Vec<Finding>>,
    /// ISO-8601 completion timestamp.
    pub timestamp: String,
}

impl Success {
    /// Empty success stamped with the current time. Intended for
    /// struct-update syntax: `Success { status: Some(200), ..Success::now() }`.
    pub fn now() -> Self {
        Self {
            success: true,
            extracted_value: None,
            api_response: None,
            response_time: None,
            status: None,
            findings: None,
            timestamp: now_iso(),
        }
    }
}

/// Failed fact result.
///
/// Exactly one of `error` or `reason` is set; the constructors on
/// [`FactOutcome`] enforce this.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    /// Always `false`.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl FactOutcome {
    /// Expected negative reported through the `error` field, with a
    /// completion timestamp (e.g. "No file data available").
    pub fn error(message: impl Into<String>) -> Self {
        FactOutcome::Failure(Failure {
            success: false,
            error: Some(message.into()),
            reason: None,
            timestamp: Some(now_iso()),
        })
    }

    /// Expected negative reported through the `reason` field.
    ///
    /// Carries no timestamp: the "No match found" path omits it and
    /// downstream rules depend on that shape.
    pub fn negative(reason: impl Into<String>) -> Self {
        FactOutcome::Failure(Failure {
            success: false,
            error: None,
            reason: Some(reason.into()),
            timestamp: None,
        })
    }

    /// Serialize to the host's JSON shape.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
