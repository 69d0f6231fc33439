//! API validator plugin.
//!
//! Contributes the `externalApiCall` fact (regex extraction over file
//! content followed by an outbound HTTP call) and the `regexExtract`
//! operator (non-empty match check over upstream analysis results).

mod external_call;
mod regex_extract;

pub use external_call::ExternalApiCall;
pub use regex_extract::RegexExtract;

use std::sync::Arc;

use rulepack_plugin::{translate_error, Plugin};

/// Build the descriptor this plugin registers with the host.
pub fn plugin() -> Plugin {
    Plugin {
        name: "api-validator",
        version: env!("CARGO_PKG_VERSION"),
        facts: vec![Arc::new(ExternalApiCall::new())],
        operators: vec![Arc::new(RegexExtract)],
        on_error: Some(translate_error),
    }
}
