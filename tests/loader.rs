//! Registry loading behavior on scratch directories.

use std::fs;

use notecard_schema::loader::SchemaRegistry;
use notecard_schema::schema::SchemaError;
use serde_json::json;

const GOOD_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "card.demo Request Application Programming Interface (API) Schema",
  "type": "object",
  "properties": {
    "req": {"description": "Request for the card.demo API.", "const": "card.demo"},
    "cmd": {"description": "Command for the card.demo API.", "const": "card.demo"}
  },
  "oneOf": [
    {"required": ["req"], "properties": {"req": {"const": "card.demo"}}},
    {"required": ["cmd"], "properties": {"cmd": {"const": "card.demo"}}}
  ],
  "additionalProperties": false,
  "samples": [{"description": "Basic request.", "json": "{\"req\": \"card.demo\"}"}]
}"#;

#[test]
fn empty_directory_yields_empty_registry() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = SchemaRegistry::new(tmp.path()).unwrap();
    assert_eq!(registry.count(), 0);
    assert!(registry.names().is_empty());
}

#[test]
fn missing_directory_is_a_load_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = SchemaRegistry::new(tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, SchemaError::SchemaLoad { .. }));
}

#[test]
fn loads_matching_files_and_ignores_the_rest() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("card.demo.req.notecard.api.json"),
        GOOD_SCHEMA,
    )
    .unwrap();
    fs::write(tmp.path().join("README.md"), "not a schema").unwrap();
    fs::write(tmp.path().join("notes.json"), "{}").unwrap();

    let registry = SchemaRegistry::new(tmp.path()).unwrap();
    assert_eq!(registry.count(), 1);
    assert_eq!(registry.names(), vec!["card.demo.req.notecard.api.json"]);

    registry
        .validate(
            "card.demo.req.notecard.api.json",
            &json!({"req": "card.demo"}),
        )
        .unwrap();
}

#[test]
fn malformed_schema_file_aborts_loading() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("card.demo.req.notecard.api.json"),
        GOOD_SCHEMA,
    )
    .unwrap();
    fs::write(
        tmp.path().join("card.broken.req.notecard.api.json"),
        "{not json",
    )
    .unwrap();

    let err = SchemaRegistry::new(tmp.path()).unwrap_err();
    match err {
        SchemaError::SchemaLoad { name, .. } => {
            assert_eq!(name, "card.broken.req.notecard.api.json");
        }
        other => panic!("expected SchemaLoad, got: {other}"),
    }
}

#[test]
fn uncompilable_schema_file_aborts_loading() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("card.bad.req.notecard.api.json"),
        r#"{"type": "float"}"#,
    )
    .unwrap();

    let err = SchemaRegistry::new(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("float"), "{err}");
}

#[test]
fn registry_exposes_raw_and_compiled_views() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("card.demo.req.notecard.api.json"),
        GOOD_SCHEMA,
    )
    .unwrap();

    let registry = SchemaRegistry::new(tmp.path()).unwrap();
    let doc = registry.get("card.demo.req.notecard.api.json").unwrap();
    assert_eq!(
        doc.title.as_deref(),
        Some("card.demo Request Application Programming Interface (API) Schema")
    );
    assert_eq!(doc.samples.len(), 1);

    let raw = registry.raw("card.demo.req.notecard.api.json").unwrap();
    assert_eq!(raw["oneOf"].as_array().unwrap().len(), 2);
}
