//! Conformance checker and test corpus for the Notecard device-management
//! API JSON Schema documents.
//!
//! The `schemas/` directory holds one schema per API message
//! (`<command>.req.notecard.api.json` / `<command>.rsp.notecard.api.json`).
//! [`loader::SchemaRegistry`] loads them once into immutable compiled
//! documents. [`checker::validate`] takes an instance and a compiled
//! schema and returns pass or a list of violations. [`audit`] enforces
//! the corpus-wide metadata invariants: bidirectional coverage between
//! enums and their sub-descriptions, and parseable samples.

pub mod audit;
pub mod checker;
pub mod config;
pub mod loader;
pub mod schema;

pub use checker::{validate, ValidationError, Violation};
pub use loader::{RegistryError, SchemaRegistry};
pub use schema::{JsonType, Sample, SchemaDocument, SchemaError, SchemaNode, SubDescription};
