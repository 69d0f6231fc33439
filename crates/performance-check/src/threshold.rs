//! `thresholdCheck` operator: inclusive latency upper bound.

use serde_json::Value;
use tracing::debug;

use rulepack_plugin::Operator;

/// Name the host resolves this operator under.
pub const OPERATOR_NAME: &str = "thresholdCheck";

/// Passes when the input's numeric `responseTime` is at or below the
/// threshold. The boundary value counts as a pass; any shape violation
/// (missing, null, non-numeric field or threshold) degrades to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdCheck;

impl Operator for ThresholdCheck {
    fn name(&self) -> &'static str {
        OPERATOR_NAME
    }

    fn evaluate(&self, fact_result: &Value, threshold: &Value) -> bool {
        debug!(operator = OPERATOR_NAME, "operator called");

        let Some(response_time) = fact_result.get("responseTime").and_then(Value::as_f64) else {
            debug!(operator = OPERATOR_NAME, "invalid input");
            return false;
        };
        let Some(limit) = threshold.as_f64() else {
            debug!(operator = OPERATOR_NAME, "non-numeric threshold");
            return false;
        };

        let result = response_time <= limit;
        debug!(
            operator = OPERATOR_NAME,
            response_time,
            threshold = limit,
            result,
            "check complete"
        );
        result
    }
}
