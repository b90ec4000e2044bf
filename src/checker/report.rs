use std::fmt;

use serde_json::Value;

/// A single detected mismatch between an instance and a schema constraint.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON-Pointer-style path to the offending location in the instance
    /// (empty string for the root).
    pub path: String,
    /// Schema keyword that failed (`type`, `required`, `enum`, ...).
    pub keyword: &'static str,
    /// Human-readable description of the mismatch.
    pub message: String,
    /// Nested per-branch violations, populated for combinator failures.
    pub context: Vec<Violation>,
}

impl Violation {
    pub fn new(path: impl Into<String>, keyword: &'static str, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            keyword,
            message: message.into(),
            context: Vec::new(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }
        for nested in &self.context {
            write!(f, "\n    {nested}")?;
        }
        Ok(())
    }
}

/// Instance does not conform to the schema.
///
/// Carries every violation found in one validation pass; `Display` lists
/// them all, nested combinator context indented.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The first violation, in evaluation order.
    pub fn first(&self) -> &Violation {
        &self.violations[0]
    }

    /// Concatenated message text, used by substring assertions.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Canonical rendering of an instance value for message text.
///
/// Compact JSON (`true`, `"22.5"`, `{"req":"card.restore"}`). This is the
/// crate's own stringification, kept internally consistent; callers must
/// not rely on any other validator's wording of the same values.
pub fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

/// Render an ordered list of literals for enum messages.
pub fn render_literals(values: &[Value]) -> String {
    let rendered: Vec<String> = values.iter().map(render_value).collect();
    rendered.join(", ")
}

/// Message for a `type` failure.
pub fn type_mismatch(value: &Value, type_name: &str) -> String {
    format!("{} is not of type '{}'", render_value(value), type_name)
}

/// Message for a missing `required` property.
pub fn required_missing(name: &str) -> String {
    format!("'{name}' is a required property")
}

/// Message for `additionalProperties: false`.
///
/// Lists every offending name sorted, with was/were agreement. Always
/// contains the `"are not allowed"` substring.
pub fn additional_not_allowed(names: &[&str]) -> String {
    let mut sorted: Vec<&str> = names.to_vec();
    sorted.sort_unstable();
    let quoted: Vec<String> = sorted.iter().map(|n| format!("'{n}'")).collect();
    let verb = if quoted.len() == 1 { "was" } else { "were" };
    format!(
        "Additional properties are not allowed ({} {} unexpected)",
        quoted.join(", "),
        verb
    )
}

/// Message for an `enum` failure.
pub fn not_in_enum(value: &Value, literals: &[Value]) -> String {
    format!(
        "{} is not one of [{}]",
        render_value(value),
        render_literals(literals)
    )
}

/// Message for a `const` failure.
pub fn const_mismatch(expected: &Value) -> String {
    format!("{} was expected", render_value(expected))
}

/// Message for a `oneOf` where no branch passed.
pub fn not_valid_under_any(instance: &Value) -> String {
    format!(
        "{} is not valid under any of the given schemas",
        render_value(instance)
    )
}

/// Message for a `oneOf` where more than one branch passed.
pub fn valid_under_each(instance: &Value, branches: &[String]) -> String {
    format!(
        "{} is valid under each of {}",
        render_value(instance),
        branches.join(", ")
    )
}
