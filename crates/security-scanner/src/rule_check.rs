//! `securityRuleCheck` operator: findings count or per-type allow map.

use serde_json::Value;
use tracing::debug;

use rulepack_plugin::Operator;

/// Name the host resolves this operator under.
pub const OPERATOR_NAME: &str = "securityRuleCheck";

/// Evaluates a scan result against a polymorphic threshold:
///
/// - numeric threshold: pass iff the findings count is at or below it;
/// - object threshold: pass iff no finding's `type` maps to an
///   explicit `false` (missing keys and `true` are allowed);
/// - anything else (including null): fail closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityRuleCheck;

impl Operator for SecurityRuleCheck {
    fn name(&self) -> &'static str {
        OPERATOR_NAME
    }

    fn evaluate(&self, fact_result: &Value, threshold: &Value) -> bool {
        debug!(operator = OPERATOR_NAME, "operator called");

        let Some(findings) = fact_result.get("findings").and_then(Value::as_array) else {
            debug!(operator = OPERATOR_NAME, "invalid input");
            return false;
        };

        match threshold {
            Value::Number(limit) => {
                let Some(limit) = limit.as_f64() else {
                    return false;
                };
                let result = findings.len() as f64 <= limit;
                debug!(
                    operator = OPERATOR_NAME,
                    findings_count = findings.len(),
                    threshold = limit,
                    result,
                    "threshold check complete"
                );
                result
            }
            Value::Object(rules) => {
                let result = !findings.iter().any(|finding| {
                    finding
                        .get("type")
                        .and_then(Value::as_str)
                        .map(|kind| rules.get(kind) == Some(&Value::Bool(false)))
                        .unwrap_or(false)
                });
                debug!(operator = OPERATOR_NAME, result, "rules check complete");
                result
            }
            // Fail closed on any other threshold shape.
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(input: Value, threshold: Value) -> bool {
        SecurityRuleCheck.evaluate(&input, &threshold)
    }

    #[test]
    fn empty_findings_pass_zero_threshold() {
        assert!(check(json!({"findings": []}), json!(0)));
    }

    #[test]
    fn count_threshold_is_inclusive() {
        let two = json!({"findings": [{"type": "apiKey"}, {"type": "password"}]});
        assert!(check(two.clone(), json!(2)));
        assert!(check(two.clone(), json!(3)));
        assert!(!check(two, json!(1)));
    }

    #[test]
    fn rule_map_blocks_explicitly_forbidden_types() {
        let finding = json!({"findings": [{"type": "apiKey"}]});
        assert!(!check(finding.clone(), json!({"apiKey": false})));
        assert!(check(finding.clone(), json!({"apiKey": true})));
        assert!(check(finding, json!({"password": false})));
    }

    #[test]
    fn rule_map_ignores_findings_without_a_type() {
        let odd = json!({"findings": [{"line": 3}, {"type": 7}]});
        assert!(check(odd, json!({"apiKey": false})));
    }

    #[test]
    fn fails_on_missing_or_malformed_findings() {
        assert!(!check(json!(null), json!(0)));
        assert!(!check(json!({}), json!(0)));
        assert!(!check(json!({"findings": "none"}), json!(0)));
        assert!(!check(json!({"findings": {}}), json!(0)));
    }

    #[test]
    fn unsupported_threshold_types_fail_closed() {
        let empty = json!({"findings": []});
        assert!(!check(empty.clone(), json!(null)));
        assert!(!check(empty.clone(), json!("0")));
        assert!(!check(empty.clone(), json!(true)));
        assert!(!check(empty, json!([0])));
    }
}
