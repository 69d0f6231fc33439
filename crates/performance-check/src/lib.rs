//! Performance check plugin.
//!
//! Contributes the `responseTime` fact (timed HTTP GET against an
//! endpoint) and the `thresholdCheck` operator (inclusive upper bound
//! over the measured latency).

mod response_time;
mod threshold;

pub use response_time::ResponseTime;
pub use threshold::ThresholdCheck;

use std::sync::Arc;

use rulepack_plugin::Plugin;

/// Build the descriptor this plugin registers with the host.
pub fn plugin() -> Plugin {
    Plugin {
        name: "performance-check",
        version: env!("CARGO_PKG_VERSION"),
        facts: vec![Arc::new(ResponseTime::new())],
        operators: vec![Arc::new(ThresholdCheck)],
        on_error: None,
    }
}
