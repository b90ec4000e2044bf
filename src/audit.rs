//! Corpus metadata audit.
//!
//! Schemas carry two documentation conventions beyond the keyword set:
//! `samples` (embedded fixtures) and `sub-descriptions` (prose for each
//! enum literal). The audit enforces their consistency rules:
//!
//! 1. Every enum value of a property that declares `sub-descriptions`
//!    has a matching sub-description `const`, and vice versa
//!    (bidirectional coverage).
//! 2. Every sub-description carries a non-empty description.
//! 3. Every sample's `json` string parses.
//!
//! An empty finding list is the corpus invariant; tests assert it across
//! every schema file.

use std::fmt;

use crate::loader::SchemaRegistry;
use crate::schema::{SchemaDocument, SchemaNode};

/// One audit rule violation, located by schema name and node path.
#[derive(Debug, Clone)]
pub struct AuditFinding {
    pub schema: String,
    pub path: String,
    pub detail: FindingDetail,
}

#[derive(Debug, Clone)]
pub enum FindingDetail {
    /// Enum literal with no sub-description `const`.
    EnumValueUndescribed(String),
    /// Sub-description `const` not present in the enum.
    SubDescriptionUnmatched(String),
    /// Sub-descriptions present on a node with no enum.
    SubDescriptionsWithoutEnum,
    /// Sub-description whose description is empty or whitespace.
    EmptyDescription(String),
    /// Sample whose embedded JSON does not parse.
    UnparseableSample { index: usize, reason: String },
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        match &self.detail {
            FindingDetail::EnumValueUndescribed(value) => write!(
                f,
                "{}: {location}: enum value {value} has no sub-description",
                self.schema
            ),
            FindingDetail::SubDescriptionUnmatched(value) => write!(
                f,
                "{}: {location}: sub-description const {value} is not an enum value",
                self.schema
            ),
            FindingDetail::SubDescriptionsWithoutEnum => write!(
                f,
                "{}: {location}: sub-descriptions present but no enum declared",
                self.schema
            ),
            FindingDetail::EmptyDescription(value) => write!(
                f,
                "{}: {location}: sub-description for {value} has an empty description",
                self.schema
            ),
            FindingDetail::UnparseableSample { index, reason } => write!(
                f,
                "{}: sample {index} does not parse: {reason}",
                self.schema
            ),
        }
    }
}

/// Audit one schema document.
pub fn audit_document(doc: &SchemaDocument) -> Vec<AuditFinding> {
    let mut findings = Vec::new();
    audit_node(&doc.root, &doc.name, "", &mut findings);

    for (index, sample) in doc.samples.iter().enumerate() {
        if let Err(e) = sample.instance() {
            findings.push(AuditFinding {
                schema: doc.name.clone(),
                path: String::new(),
                detail: FindingDetail::UnparseableSample {
                    index,
                    reason: e.to_string(),
                },
            });
        }
    }

    findings
}

/// Audit every document in a registry, in name order.
pub fn audit_registry(registry: &SchemaRegistry) -> Vec<AuditFinding> {
    registry.documents().flat_map(audit_document).collect()
}

fn audit_node(node: &SchemaNode, schema: &str, path: &str, findings: &mut Vec<AuditFinding>) {
    if !node.sub_descriptions.is_empty() {
        match &node.enum_values {
            None => findings.push(AuditFinding {
                schema: schema.to_string(),
                path: path.to_string(),
                detail: FindingDetail::SubDescriptionsWithoutEnum,
            }),
            Some(literals) => {
                for literal in literals {
                    let described = node
                        .sub_descriptions
                        .iter()
                        .any(|sub| &sub.const_value == literal);
                    if !described {
                        findings.push(AuditFinding {
                            schema: schema.to_string(),
                            path: path.to_string(),
                            detail: FindingDetail::EnumValueUndescribed(literal.to_string()),
                        });
                    }
                }
                for sub in &node.sub_descriptions {
                    if !literals.contains(&sub.const_value) {
                        findings.push(AuditFinding {
                            schema: schema.to_string(),
                            path: path.to_string(),
                            detail: FindingDetail::SubDescriptionUnmatched(
                                sub.const_value.to_string(),
                            ),
                        });
                    }
                }
            }
        }

        for sub in &node.sub_descriptions {
            if sub.description.trim().is_empty() {
                findings.push(AuditFinding {
                    schema: schema.to_string(),
                    path: path.to_string(),
                    detail: FindingDetail::EmptyDescription(sub.const_value.to_string()),
                });
            }
        }
    }

    for (name, sub) in &node.properties {
        let sub_path = format!("{path}/properties/{name}");
        audit_node(sub, schema, &sub_path, findings);
    }
    if let Some(items) = &node.items {
        audit_node(items, schema, &format!("{path}/items"), findings);
    }
    if let Some(branches) = &node.one_of {
        for (i, branch) in branches.iter().enumerate() {
            audit_node(branch, schema, &format!("{path}/oneOf/{i}"), findings);
        }
    }
}
