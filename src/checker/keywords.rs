use serde_json::Value;

use crate::schema::{AdditionalProperties, SchemaNode};

use super::report::{self, Violation};

/// Evaluate `const` and `enum` against the instance.
pub(crate) fn check_literals(
    instance: &Value,
    schema: &SchemaNode,
    path: &str,
    out: &mut Vec<Violation>,
) {
    if let Some(expected) = &schema.const_value {
        if instance != expected {
            out.push(Violation::new(
                path,
                "const",
                report::const_mismatch(expected),
            ));
        }
    }

    if let Some(literals) = &schema.enum_values {
        if !literals.contains(instance) {
            out.push(Violation::new(
                path,
                "enum",
                report::not_in_enum(instance, literals),
            ));
        }
    }
}

/// Evaluate `required`, `properties`, and `additionalProperties`.
///
/// These keywords constrain object instances only; any other instance
/// variant passes through untouched, per the usual schema semantics.
pub(crate) fn check_object(
    instance: &Value,
    schema: &SchemaNode,
    path: &str,
    out: &mut Vec<Violation>,
) {
    let Some(obj) = instance.as_object() else {
        return;
    };

    for name in &schema.required {
        if !obj.contains_key(name) {
            out.push(Violation::new(
                path,
                "required",
                report::required_missing(name),
            ));
        }
    }

    for (name, sub) in &schema.properties {
        if let Some(value) = obj.get(name) {
            let sub_path = format!("{path}/{name}");
            super::check_at(value, sub, &sub_path, out);
        }
    }

    let unknown: Vec<&str> = obj
        .keys()
        .filter(|k| !schema.properties.contains_key(k.as_str()))
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        return;
    }

    match &schema.additional {
        AdditionalProperties::Allowed => {}
        AdditionalProperties::Forbidden => {
            out.push(Violation::new(
                path,
                "additionalProperties",
                report::additional_not_allowed(&unknown),
            ));
        }
        AdditionalProperties::Schema(sub) => {
            for name in unknown {
                let sub_path = format!("{path}/{name}");
                super::check_at(&obj[name], sub, &sub_path, out);
            }
        }
    }
}

/// Evaluate `items` against every element of an array instance.
pub(crate) fn check_items(
    instance: &Value,
    schema: &SchemaNode,
    path: &str,
    out: &mut Vec<Violation>,
) {
    let Some(items) = &schema.items else {
        return;
    };
    let Some(elements) = instance.as_array() else {
        return;
    };
    for (index, element) in elements.iter().enumerate() {
        let sub_path = format!("{path}/{index}");
        super::check_at(element, items, &sub_path, out);
    }
}
