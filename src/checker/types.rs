use serde_json::Value;

use crate::schema::JsonType;

/// Decide whether a value's runtime variant satisfies a declared type.
///
/// Booleans are their own variant in `serde_json::Value`, so they can
/// never satisfy `integer` or `number`; the distinction is structural,
/// not introspective. A float with zero fractional part satisfies
/// `integer` (`1.0` passes, `1.5` does not), matching draft 2020-12.
pub fn matches_type(value: &Value, ty: JsonType) -> bool {
    match ty {
        JsonType::Object => value.is_object(),
        JsonType::Array => value.is_array(),
        JsonType::String => value.is_string(),
        JsonType::Boolean => value.is_boolean(),
        JsonType::Null => value.is_null(),
        JsonType::Number => value.is_number(),
        JsonType::Integer => match value {
            Value::Number(n) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            _ => false,
        },
    }
}
