//! Conformance checker: a single-pass, top-down recursive evaluation of
//! an instance against a compiled schema.
//!
//! Evaluation is pure: no shared state, no I/O, depth bounded by the
//! instance. The walk visits `type` first, then literal keywords
//! (`const`/`enum`), then object and array keywords, then `oneOf`.

pub mod combinator;
pub mod keywords;
pub mod report;
pub mod types;

pub use report::{ValidationError, Violation};

use serde_json::Value;

use crate::schema::SchemaNode;

/// Validate an instance against a compiled schema.
///
/// The library boundary: `Ok(())` on conformance, otherwise a
/// [`ValidationError`] carrying every violation found.
pub fn validate(instance: &Value, schema: &SchemaNode) -> Result<(), ValidationError> {
    let violations = check(instance, schema);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

/// Collect every violation between the instance and the schema.
///
/// An empty list means the instance conforms.
pub fn check(instance: &Value, schema: &SchemaNode) -> Vec<Violation> {
    let mut out = Vec::new();
    check_at(instance, schema, "", &mut out);
    out
}

/// Recursive walker shared by every keyword module.
///
/// A `type` mismatch short-circuits the node: the remaining keywords
/// constrain a value of the declared type, so reporting them on top of
/// the mismatch would only duplicate noise.
pub(crate) fn check_at(
    instance: &Value,
    schema: &SchemaNode,
    path: &str,
    out: &mut Vec<Violation>,
) {
    if let Some(ty) = schema.ty {
        if !types::matches_type(instance, ty) {
            out.push(Violation::new(
                path,
                "type",
                report::type_mismatch(instance, ty.name()),
            ));
            return;
        }
    }

    keywords::check_literals(instance, schema, path, out);
    keywords::check_object(instance, schema, path, out);
    keywords::check_items(instance, schema, path, out);

    if let Some(branches) = &schema.one_of {
        combinator::check_one_of(instance, branches, path, out);
    }
}
