use serde_json::Value;

use crate::schema::SchemaNode;

use super::report::{self, Violation};

/// Evaluate a `oneOf` combinator: exactly one branch must pass.
///
/// Every branch is evaluated independently. Zero passing branches is a
/// failure carrying each branch's violations as nested context; more
/// than one passing branch is the ambiguity failure that distinguishes
/// `oneOf` from `anyOf`.
pub(crate) fn check_one_of(
    instance: &Value,
    branches: &[SchemaNode],
    path: &str,
    out: &mut Vec<Violation>,
) {
    let mut passing: Vec<&SchemaNode> = Vec::new();
    let mut branch_failures: Vec<Violation> = Vec::new();

    for branch in branches {
        let mut attempt = Vec::new();
        super::check_at(instance, branch, path, &mut attempt);
        if attempt.is_empty() {
            passing.push(branch);
        } else {
            branch_failures.extend(attempt);
        }
    }

    match passing.len() {
        1 => {}
        0 => {
            let mut violation = Violation::new(path, "oneOf", report::not_valid_under_any(instance));
            violation.context = branch_failures;
            out.push(violation);
        }
        _ => {
            let rendered: Vec<String> = passing
                .iter()
                .map(|branch| report::render_value(&branch.to_value()))
                .collect();
            out.push(Violation::new(
                path,
                "oneOf",
                report::valid_under_each(instance, &rendered),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn req_cmd_branches(command: &str) -> Vec<SchemaNode> {
        let source = json!([
            {"required": ["req"], "properties": {"req": {"const": command}}},
            {"required": ["cmd"], "properties": {"cmd": {"const": command}}}
        ]);
        source
            .as_array()
            .unwrap()
            .iter()
            .map(|b| SchemaNode::compile(b, "").unwrap())
            .collect()
    }

    #[test]
    fn exactly_one_passing_branch_is_silent() {
        let branches = req_cmd_branches("card.restore");
        let mut out = Vec::new();
        check_one_of(&json!({"req": "card.restore"}), &branches, "", &mut out);
        assert!(out.is_empty());
        check_one_of(&json!({"cmd": "card.restore"}), &branches, "", &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn zero_passing_branches_preserves_nested_reasons() {
        let branches = req_cmd_branches("card.restore");
        let mut out = Vec::new();
        check_one_of(&json!({}), &branches, "", &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0]
            .message
            .contains("is not valid under any of the given schemas"));
        // One failure per branch: both required checks.
        assert_eq!(out[0].context.len(), 2);
        assert!(out[0].context[0].message.contains("'req' is a required property"));
        assert!(out[0].context[1].message.contains("'cmd' is a required property"));
    }

    #[test]
    fn multiple_passing_branches_is_ambiguity_failure() {
        let branches = req_cmd_branches("card.restore");
        let mut out = Vec::new();
        check_one_of(
            &json!({"req": "card.restore", "cmd": "card.restore"}),
            &branches,
            "",
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("is valid under each of"));
        assert!(out[0].message.contains("\"required\":[\"req\"]"));
        assert!(out[0].message.contains("\"required\":[\"cmd\"]"));
    }

    #[test]
    fn wrong_command_string_fails_both_branches() {
        let branches = req_cmd_branches("card.restore");
        let mut out = Vec::new();
        check_one_of(&json!({"req": "card.reset"}), &branches, "", &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("not valid under any"));
    }
}
