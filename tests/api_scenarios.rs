//! Concrete per-command scenarios.

use std::path::PathBuf;

use notecard_schema::loader::SchemaRegistry;
use serde_json::{json, Value};

fn registry() -> SchemaRegistry {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schemas");
    SchemaRegistry::new(dir).unwrap()
}

fn failure_message(registry: &SchemaRegistry, name: &str, instance: &Value) -> String {
    match registry.validate(name, instance) {
        Ok(()) => panic!("{name}: expected {instance} to be rejected"),
        Err(e) => e.to_string(),
    }
}

#[test]
fn card_restore_request_with_flags_validates() {
    let registry = registry();
    registry
        .validate(
            "card.restore.req.notecard.api.json",
            &json!({"req": "card.restore", "delete": true, "connected": true}),
        )
        .unwrap();
}

#[test]
fn card_restore_req_and_cmd_is_ambiguous() {
    let registry = registry();
    let message = failure_message(
        &registry,
        "card.restore.req.notecard.api.json",
        &json!({"req": "card.restore", "cmd": "card.restore"}),
    );
    assert!(message.contains("is valid under each of"));
}

#[test]
fn card_restore_empty_request_fails_every_branch() {
    let registry = registry();
    let message = failure_message(&registry, "card.restore.req.notecard.api.json", &json!({}));
    assert!(message.contains("is not valid under any of the given schemas"));
    // Nested branch reasons survive for diagnostics.
    assert!(message.contains("'req' is a required property"));
    assert!(message.contains("'cmd' is a required property"));
}

#[test]
fn card_temp_response_rejects_stringly_typed_value() {
    let registry = registry();
    let message = failure_message(
        &registry,
        "card.temp.rsp.notecard.api.json",
        &json!({"value": "22.5"}),
    );
    assert!(message.contains("is not of type 'number'"), "{message}");
    assert!(message.contains("22.5"), "{message}");
}

#[test]
fn card_temp_response_accepts_reading() {
    let registry = registry();
    registry
        .validate(
            "card.temp.rsp.notecard.api.json",
            &json!({"value": 27.625, "calibration": -3.0, "usb": false}),
        )
        .unwrap();
}

#[test]
fn card_io_mode_outside_enum_is_rejected_with_literal_list() {
    let registry = registry();
    let message = failure_message(
        &registry,
        "card.io.req.notecard.api.json",
        &json!({"req": "card.io", "mode": "usb"}),
    );
    assert!(message.contains("is not one of"), "{message}");
    // Enum literals render in declared order.
    assert!(
        message.contains("[\"+busy\", \"-busy\", \"+usb\", \"-usb\"]"),
        "{message}"
    );
}

#[test]
fn env_get_names_must_be_strings() {
    let registry = registry();
    let message = failure_message(
        &registry,
        "env.get.req.notecard.api.json",
        &json!({"req": "env.get", "names": ["monitor-pump", 7]}),
    );
    assert!(message.contains("/names/1"), "{message}");
    assert!(message.contains("is not of type 'string'"), "{message}");
}

#[test]
fn note_add_body_must_be_an_object() {
    let registry = registry();
    let message = failure_message(
        &registry,
        "note.add.req.notecard.api.json",
        &json!({"req": "note.add", "file": "sensors.qo", "body": [1, 2]}),
    );
    assert!(message.contains("is not of type 'object'"), "{message}");
}

#[test]
fn dfu_status_name_enum_is_enforced() {
    let registry = registry();
    registry
        .validate(
            "dfu.status.req.notecard.api.json",
            &json!({"req": "dfu.status", "name": "user"}),
        )
        .unwrap();
    let message = failure_message(
        &registry,
        "dfu.status.req.notecard.api.json",
        &json!({"req": "dfu.status", "name": "host"}),
    );
    assert!(message.contains("is not one of [\"user\", \"card\"]"), "{message}");
}

#[test]
fn card_version_nested_body_is_validated() {
    let registry = registry();
    let message = failure_message(
        &registry,
        "card.version.rsp.notecard.api.json",
        &json!({"version": "notecard-9.1.1", "body": {"ver_major": "nine"}}),
    );
    assert!(message.contains("/body/ver_major"), "{message}");
    assert!(message.contains("is not of type 'integer'"), "{message}");
}

#[test]
fn unknown_schema_name_is_a_schema_error() {
    let registry = registry();
    let err = registry
        .validate("card.bogus.req.notecard.api.json", &json!({}))
        .unwrap_err();
    assert!(err.to_string().contains("Schema not found"));
}
