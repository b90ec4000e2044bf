use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error at '{path}': {reason}")]
    SchemaCompile { path: String, reason: String },
    #[error("Sample {index} of schema '{schema}' is not valid JSON: {reason}")]
    SampleParse {
        schema: String,
        index: usize,
        reason: String,
    },
    #[error("Schema '{name}' could not be loaded: {reason}")]
    SchemaLoad { name: String, reason: String },
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Primitive type names accepted by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl JsonType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

/// Policy for instance properties not listed under `properties`.
#[derive(Debug, Clone, Default)]
pub enum AdditionalProperties {
    /// Keyword absent or `true`: unknown properties pass through.
    #[default]
    Allowed,
    /// `false`: any unknown property is a violation.
    Forbidden,
    /// Sub-schema form: unknown property values validate against it.
    Schema(Box<SchemaNode>),
}

/// Documentation metadata binding one enum literal to prose.
///
/// Not a JSON Schema keyword but a corpus convention, attached to
/// enum-bearing properties under `sub-descriptions`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubDescription {
    #[serde(rename = "const")]
    pub const_value: Value,
    pub description: String,
}

/// An embedded documentation fixture: `json` holds a JSON document as a
/// string and must itself validate against the schema that carries it.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    pub description: String,
    pub json: String,
}

impl Sample {
    /// Parse the embedded JSON string into an instance value.
    pub fn instance(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.json)
    }
}

/// One compiled schema node: the keyword subset the corpus uses.
///
/// Immutable once compiled; unknown keys in the source document
/// (`$schema`, `$id`, `title`, `version`, `apiVersion`, ...) are ignored.
#[derive(Debug, Clone, Default)]
pub struct SchemaNode {
    pub ty: Option<JsonType>,
    pub properties: BTreeMap<String, SchemaNode>,
    pub required: Vec<String>,
    pub additional: AdditionalProperties,
    pub items: Option<Box<SchemaNode>>,
    pub enum_values: Option<Vec<Value>>,
    pub const_value: Option<Value>,
    pub one_of: Option<Vec<SchemaNode>>,
    pub sub_descriptions: Vec<SubDescription>,
    pub description: Option<String>,
}

impl SchemaNode {
    /// Compile a schema node from its JSON source.
    ///
    /// `path` locates the node within the document for error reporting
    /// (empty string for the root).
    pub fn compile(source: &Value, path: &str) -> Result<Self, SchemaError> {
        let obj = source
            .as_object()
            .ok_or_else(|| SchemaError::SchemaCompile {
                path: path.to_string(),
                reason: "schema must be a JSON object".to_string(),
            })?;

        let mut node = SchemaNode::default();

        if let Some(ty) = obj.get("type") {
            let name = ty.as_str().ok_or_else(|| SchemaError::SchemaCompile {
                path: format!("{path}/type"),
                reason: "type must be a single string".to_string(),
            })?;
            node.ty = Some(JsonType::from_name(name).ok_or_else(|| {
                SchemaError::SchemaCompile {
                    path: format!("{path}/type"),
                    reason: format!("unknown type name '{name}'"),
                }
            })?);
        }

        if let Some(props) = obj.get("properties") {
            let map = props
                .as_object()
                .ok_or_else(|| SchemaError::SchemaCompile {
                    path: format!("{path}/properties"),
                    reason: "properties must be an object".to_string(),
                })?;
            for (name, sub) in map {
                let sub_path = format!("{path}/properties/{name}");
                node.properties
                    .insert(name.clone(), SchemaNode::compile(sub, &sub_path)?);
            }
        }

        if let Some(req) = obj.get("required") {
            let list = req.as_array().ok_or_else(|| SchemaError::SchemaCompile {
                path: format!("{path}/required"),
                reason: "required must be an array".to_string(),
            })?;
            for entry in list {
                let name = entry.as_str().ok_or_else(|| SchemaError::SchemaCompile {
                    path: format!("{path}/required"),
                    reason: "required entries must be strings".to_string(),
                })?;
                node.required.push(name.to_string());
            }
        }

        if let Some(ap) = obj.get("additionalProperties") {
            node.additional = match ap {
                Value::Bool(true) => AdditionalProperties::Allowed,
                Value::Bool(false) => AdditionalProperties::Forbidden,
                Value::Object(_) => {
                    let sub_path = format!("{path}/additionalProperties");
                    AdditionalProperties::Schema(Box::new(SchemaNode::compile(ap, &sub_path)?))
                }
                _ => {
                    return Err(SchemaError::SchemaCompile {
                        path: format!("{path}/additionalProperties"),
                        reason: "additionalProperties must be a boolean or a schema".to_string(),
                    })
                }
            };
        }

        if let Some(items) = obj.get("items") {
            let sub_path = format!("{path}/items");
            node.items = Some(Box::new(SchemaNode::compile(items, &sub_path)?));
        }

        if let Some(en) = obj.get("enum") {
            let list = en.as_array().ok_or_else(|| SchemaError::SchemaCompile {
                path: format!("{path}/enum"),
                reason: "enum must be an array".to_string(),
            })?;
            node.enum_values = Some(list.clone());
        }

        if let Some(c) = obj.get("const") {
            node.const_value = Some(c.clone());
        }

        if let Some(one_of) = obj.get("oneOf") {
            let list = one_of
                .as_array()
                .ok_or_else(|| SchemaError::SchemaCompile {
                    path: format!("{path}/oneOf"),
                    reason: "oneOf must be an array of schemas".to_string(),
                })?;
            let mut branches = Vec::with_capacity(list.len());
            for (i, branch) in list.iter().enumerate() {
                let sub_path = format!("{path}/oneOf/{i}");
                branches.push(SchemaNode::compile(branch, &sub_path)?);
            }
            node.one_of = Some(branches);
        }

        if let Some(subs) = obj.get("sub-descriptions") {
            node.sub_descriptions =
                serde_json::from_value(subs.clone()).map_err(|e| SchemaError::SchemaCompile {
                    path: format!("{path}/sub-descriptions"),
                    reason: format!("invalid sub-descriptions: {e}"),
                })?;
        }

        if let Some(desc) = obj.get("description").and_then(|v| v.as_str()) {
            node.description = Some(desc.to_string());
        }

        Ok(node)
    }

    /// Reconstruct the node's keyword subset as JSON.
    ///
    /// Used to render schemas inside validation messages; metadata keys
    /// dropped at compile time do not reappear.
    pub fn to_value(&self) -> Value {
        let mut obj = serde_json::Map::new();
        if let Some(ty) = self.ty {
            obj.insert("type".to_string(), Value::String(ty.name().to_string()));
        }
        if !self.properties.is_empty() {
            let props: serde_json::Map<String, Value> = self
                .properties
                .iter()
                .map(|(name, sub)| (name.clone(), sub.to_value()))
                .collect();
            obj.insert("properties".to_string(), Value::Object(props));
        }
        if !self.required.is_empty() {
            let names = self
                .required
                .iter()
                .map(|n| Value::String(n.clone()))
                .collect();
            obj.insert("required".to_string(), Value::Array(names));
        }
        match &self.additional {
            AdditionalProperties::Allowed => {}
            AdditionalProperties::Forbidden => {
                obj.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            AdditionalProperties::Schema(sub) => {
                obj.insert("additionalProperties".to_string(), sub.to_value());
            }
        }
        if let Some(items) = &self.items {
            obj.insert("items".to_string(), items.to_value());
        }
        if let Some(values) = &self.enum_values {
            obj.insert("enum".to_string(), Value::Array(values.clone()));
        }
        if let Some(c) = &self.const_value {
            obj.insert("const".to_string(), c.clone());
        }
        if let Some(branches) = &self.one_of {
            let list = branches.iter().map(SchemaNode::to_value).collect();
            obj.insert("oneOf".to_string(), Value::Array(list));
        }
        Value::Object(obj)
    }
}

/// A compiled schema document for one API message.
///
/// Holds the compiled root node, the embedded samples, and the raw JSON
/// source (kept for consumers that feed the document to an external
/// validator).
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// File name the schema was loaded under, e.g.
    /// `card.restore.req.notecard.api.json`.
    pub name: String,
    pub title: Option<String>,
    pub version: Option<String>,
    pub api_version: Option<String>,
    pub root: SchemaNode,
    pub samples: Vec<Sample>,
    raw: Value,
}

impl SchemaDocument {
    /// Compile a schema document from parsed JSON.
    pub fn from_value(name: impl Into<String>, source: Value) -> Result<Self, SchemaError> {
        let name = name.into();
        let root = SchemaNode::compile(&source, "")?;

        let mut samples = Vec::new();
        if let Some(list) = source.get("samples") {
            samples =
                serde_json::from_value(list.clone()).map_err(|e| SchemaError::SchemaCompile {
                    path: "/samples".to_string(),
                    reason: format!("invalid samples: {e}"),
                })?;
        }

        let get_str = |key: &str| {
            source
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };
        let title = get_str("title");
        let version = get_str("version");
        let api_version = get_str("apiVersion");

        Ok(Self {
            title,
            version,
            api_version,
            root,
            samples,
            raw: source,
            name,
        })
    }

    /// Compile a schema document from its JSON text.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, SchemaError> {
        let source: Value = serde_json::from_str(text)?;
        Self::from_value(name, source)
    }

    /// The raw JSON the document was compiled from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Parse every embedded sample into a (description, instance) pair.
    ///
    /// A malformed sample is a hard error here, before any validation
    /// happens: it is a broken fixture, not a nonconforming instance.
    pub fn sample_instances(&self) -> Result<Vec<(String, Value)>, SchemaError> {
        let mut out = Vec::with_capacity(self.samples.len());
        for (index, sample) in self.samples.iter().enumerate() {
            let instance = sample.instance().map_err(|e| SchemaError::SampleParse {
                schema: self.name.clone(),
                index,
                reason: e.to_string(),
            })?;
            out.push((sample.description.clone(), instance));
        }
        Ok(out)
    }
}
