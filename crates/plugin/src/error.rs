//! Host-facing plugin error shape and the error-translation hook.
//!
//! Facts raise [`PluginError`] for operational failures (transport
//! errors, bad patterns). The host invokes [`translate_error`] when a
//! plugin call fails; errors that already are plugin errors pass
//! through verbatim, anything else escalates to `fatality`.

use std::error::Error;
use std::fmt;

use serde::Serialize;

// ── Severity ────────────────────────────────────────────────────────

/// Severity levels recognized by the host, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatality,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatality => write!(f, "fatality"),
        }
    }
}

// ── Error details ───────────────────────────────────────────────────

/// Structured detail block attached to every [`PluginError`].
///
/// Serialized with camelCase keys; absent fields are omitted so the
/// host sees exactly the keys the plugin populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Name of the failing fact/operation (e.g. `externalApiCall`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Error class tag (e.g. `ResponseTimeError`, `ScanError`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_name: Option<String>,
    /// Rendered source-error chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

// ── Plugin error ────────────────────────────────────────────────────

/// The error shape the host consumes: message, severity, details.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct PluginError {
    pub message: String,
    pub level: Severity,
    pub details: ErrorDetails,
}

impl PluginError {
    /// Operational failure attributed to a named fact/operation.
    ///
    /// Severity is `error`; the host may apply its own policy on top.
    pub fn operational(message: impl Into<String>, operation: &str) -> Self {
        Self {
            message: message.into(),
            level: Severity::Error,
            details: ErrorDetails {
                operation: Some(operation.to_string()),
                ..ErrorDetails::default()
            },
        }
    }

    /// Attach an error class tag (`details.errorName`).
    pub fn with_error_name(mut self, name: &str) -> Self {
        self.details.error_name = Some(name.to_string());
        self
    }

    /// Attach a pre-rendered stack string (`details.stack`).
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.details.stack = Some(stack.into());
        self
    }

    /// Attach a stack rendered from a source error's chain.
    pub fn with_stack_from(self, source: &(dyn Error + 'static)) -> Self {
        let stack = render_stack(source);
        self.with_stack(stack)
    }
}

/// Render an error and its source chain, one frame per line.
pub fn render_stack(error: &(dyn Error + 'static)) -> String {
    let mut stack = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        stack.push_str("\n  caused by: ");
        stack.push_str(&cause.to_string());
        current = cause.source();
    }
    stack
}

// ── Translation hook ────────────────────────────────────────────────

/// Translate an arbitrary error into the host's [`PluginError`] shape.
///
/// A [`PluginError`] passes through verbatim: message, level, and
/// details are preserved exactly as the raising fact populated them.
/// Any other error escalates to `fatality` with synthesized details.
/// Infallible; never panics.
pub fn translate_error(error: &(dyn Error + 'static)) -> PluginError {
    if let Some(plugin_error) = error.downcast_ref::<PluginError>() {
        tracing::error!(
            message = %plugin_error.message,
            level = %plugin_error.level,
            "plugin error passed through"
        );
        return plugin_error.clone();
    }

    let translated = PluginError {
        message: error.to_string(),
        level: Severity::Fatality,
        details: ErrorDetails {
            operation: None,
            error_name: Some("PluginError".to_string()),
            stack: Some(render_stack(error)),
        },
    };
    tracing::error!(message = %translated.message, "unrecognized error escalated to fatality");
    translated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer {
        #[source]
        inner: Inner,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("inner cause")]
    struct Inner;

    #[test]
    fn plugin_error_passes_through_verbatim() {
        let original = PluginError::operational("API call failed", "externalApiCall")
            .with_stack("trace goes here");

        let translated = translate_error(&original);
        assert_eq!(translated, original);
        assert_eq!(translated.level, Severity::Error);
        assert_eq!(
            translated.details.operation.as_deref(),
            Some("externalApiCall")
        );
    }

    #[test]
    fn foreign_error_escalates_to_fatality() {
        let err = Outer { inner: Inner };
        let translated = translate_error(&err);

        assert_eq!(translated.message, "outer failure");
        assert_eq!(translated.level, Severity::Fatality);
        assert_eq!(translated.details.error_name.as_deref(), Some("PluginError"));
        let stack = translated.details.stack.unwrap();
        assert!(stack.contains("outer failure"));
        assert!(stack.contains("caused by: inner cause"));
    }

    #[test]
    fn serializes_with_host_keys() {
        let err = PluginError::operational("Response time check failed", "responseTime")
            .with_error_name("ResponseTimeError")
            .with_stack("frame");

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["level"], "error");
        assert_eq!(value["details"]["operation"], "responseTime");
        assert_eq!(value["details"]["errorName"], "ResponseTimeError");
        assert_eq!(value["details"]["stack"], "frame");
    }

    #[test]
    fn absent_detail_fields_are_omitted() {
        let err = PluginError::operational("API call failed", "externalApiCall");
        let value = serde_json::to_value(&err).unwrap();
        let details = value["details"].as_object().unwrap();
        assert!(details.contains_key("operation"));
        assert!(!details.contains_key("errorName"));
        assert!(!details.contains_key("stack"));
    }

    #[test]
    fn severity_serializes_lowercase() {
        for (level, expected) in [
            (Severity::Info, "info"),
            (Severity::Warning, "warning"),
            (Severity::Error, "error"),
            (Severity::Fatality, "fatality"),
        ] {
            assert_eq!(serde_json::to_value(level).unwrap(), expected);
            assert_eq!(level.to_string(), expected);
        }
    }
}
