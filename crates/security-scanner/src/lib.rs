//! Security scanner plugin.
//!
//! Contributes the `sensitiveDataScan` fact (pattern-based scan of
//! file content for sensitive strings) and the `securityRuleCheck`
//! operator (findings count or per-type allow map).

mod rule_check;
mod scan;

pub use rule_check::SecurityRuleCheck;
pub use scan::SensitiveDataScan;

use std::sync::Arc;

use rulepack_plugin::Plugin;

/// Build the descriptor this plugin registers with the host.
pub fn plugin() -> Plugin {
    Plugin {
        name: "security-scanner",
        version: env!("CARGO_PKG_VERSION"),
        facts: vec![Arc::new(SensitiveDataScan)],
        operators: vec![Arc::new(SecurityRuleCheck)],
        on_error: None,
    }
}
