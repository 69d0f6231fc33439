//! `regexExtract` operator: non-empty match check.

use serde_json::Value;
use tracing::debug;

use rulepack_plugin::Operator;

/// Name the host resolves this operator under.
pub const OPERATOR_NAME: &str = "regexExtract";

/// Passes when a prior fact's `result` field is a non-empty array.
///
/// The matching itself was performed upstream; the threshold argument
/// (the pattern) is accepted for interface symmetry and not evaluated
/// here. Malformed input degrades to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtract;

impl Operator for RegexExtract {
    fn name(&self) -> &'static str {
        OPERATOR_NAME
    }

    fn evaluate(&self, fact_result: &Value, _threshold: &Value) -> bool {
        debug!(operator = OPERATOR_NAME, "operator called");

        let matched = match fact_result.get("result").and_then(Value::as_array) {
            Some(matches) => !matches.is_empty(),
            None => {
                debug!(operator = OPERATOR_NAME, "invalid input");
                return false;
            }
        };

        debug!(operator = OPERATOR_NAME, matched, "operation result");
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(input: Value) -> bool {
        RegexExtract.evaluate(&input, &json!("some-pattern"))
    }

    #[test]
    fn passes_on_non_empty_result_array() {
        assert!(check(json!({"result": ["match-1"]})));
        assert!(check(json!({"result": ["a", "b", "c"]})));
    }

    #[test]
    fn fails_on_empty_result_array() {
        assert!(!check(json!({"result": []})));
    }

    #[test]
    fn fails_on_missing_or_malformed_result() {
        assert!(!check(json!(null)));
        assert!(!check(json!({})));
        assert!(!check(json!({"result": "not an array"})));
        assert!(!check(json!({"result": 7})));
        assert!(!check(json!({"other": ["x"]})));
        assert!(!check(json!("just a string")));
    }
}
