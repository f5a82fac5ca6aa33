//! Classification: turns the untyped diary tree into the typed node model.
//!
//! All dispatch decisions are resolved here, once: sequence-vs-record shape,
//! the `(type, tag)` field table, shrimp routing (decided by the parent tag
//! threaded through the walk), and jupyter payload opacity. The renderer
//! only ever sees a well-formed classified tree.

use serde_json::{Map, Value};

use crate::error::{DiaryError, DiaryResult};
use crate::ids::ID_KEY;
use crate::node::{
    Document, Field, FieldKind, Head, JupyterSection, Node, Section, ShrimpSection, Subtree,
};

/// Head tag whose children use the flattened shrimp-field layout.
pub const TAG_SHRIMP: &str = "shrimp";
/// Head tag whose rest is an opaque activity payload.
pub const TAG_JUPYTER_ACTIVITY: &str = "jupyter-activity";
/// Link field tag for the health-check action.
pub const TAG_HEALTH: &str = "health";
/// Link field tag for the all-activities listing.
pub const TAG_ALL_ACTIVITIES: &str = "all-activities";

const TYPE_VALUE: &str = "value";
const TYPE_LINK: &str = "link";

/// Classify a raw diary document.
///
/// Element 0 (the redundant date label) is kept verbatim; elements 1.. must
/// each be a subtree sequence. The id pass must already have run.
pub fn classify_document(raw: &Value) -> DiaryResult<Document> {
    let items = raw.as_array().ok_or_else(|| DiaryError::NotASequence {
        found: shape_name(raw).to_string(),
    })?;

    let (date_label, rest) = items.split_first().ok_or(DiaryError::EmptyDocument)?;

    let entries = rest
        .iter()
        .map(|entry| {
            let seq = entry.as_array().ok_or_else(|| DiaryError::UnexpectedShape {
                found: shape_name(entry).to_string(),
            })?;
            classify_subtree(seq)
        })
        .collect::<DiaryResult<Vec<Subtree>>>()?;

    Ok(Document {
        date_label: date_label.clone(),
        entries,
    })
}

/// Classify a subtree sequence: head first, then the rest.
///
/// A `jupyter-activity` head keeps its rest raw; anything else recurses with
/// the head's tag as the parent context.
fn classify_subtree(seq: &[Value]) -> DiaryResult<Subtree> {
    let (first, rest) = seq.split_first().ok_or(DiaryError::EmptySubtree)?;
    let head = classify_head(first)?;

    if head.tag == TAG_JUPYTER_ACTIVITY {
        return Ok(Subtree::Jupyter(JupyterSection {
            head,
            payload: rest.to_vec(),
        }));
    }

    let children = rest
        .iter()
        .map(|e| classify_element(&head.tag, e))
        .collect::<DiaryResult<Vec<Node>>>()?;

    Ok(Subtree::Section(Section { head, children }))
}

/// Classify one element of a section's rest.
///
/// A sequence is a nested subtree (routed to the shrimp layout when the
/// parent is tagged `shrimp`); a record is a leaf field. Anything else is an
/// upstream precondition violation.
fn classify_element(parent_tag: &str, raw: &Value) -> DiaryResult<Node> {
    match raw {
        Value::Array(seq) => {
            if parent_tag == TAG_SHRIMP {
                return Ok(Node::Shrimp(classify_shrimp(seq, raw)?));
            }
            Ok(Node::Subtree(classify_subtree(seq)?))
        }
        Value::Object(record) => Ok(Node::Field(classify_field(record, raw)?)),
        other => Err(DiaryError::UnexpectedShape {
            found: shape_name(other).to_string(),
        }),
    }
}

/// A shrimp child keeps its whole raw subtree as the delegate payload; the
/// head is still parsed so the element carries a stable id.
fn classify_shrimp(seq: &[Value], raw: &Value) -> DiaryResult<ShrimpSection> {
    let first = seq.first().ok_or(DiaryError::EmptySubtree)?;
    let head = classify_head(first)?;
    Ok(ShrimpSection {
        id: head.id,
        payload: raw.clone(),
    })
}

fn classify_head(raw: &Value) -> DiaryResult<Head> {
    let record = raw.as_object().ok_or_else(|| DiaryError::MalformedHead {
        reason: format!("expected a record, got {}", shape_name(raw)),
    })?;

    let tag = record
        .get("tag")
        .and_then(Value::as_str)
        .ok_or_else(|| DiaryError::MalformedHead {
            reason: "missing string 'tag'".to_string(),
        })?
        .to_string();

    let label = record
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| DiaryError::MalformedHead {
            reason: "missing string 'value'".to_string(),
        })?
        .to_string();

    Ok(Head {
        tag,
        label,
        id: require_id(record)?,
    })
}

fn classify_field(record: &Map<String, Value>, raw: &Value) -> DiaryResult<Field> {
    let id = require_id(record)?;
    let tag = record.get("tag").and_then(Value::as_str);

    let kind = match record.get("type").and_then(Value::as_str) {
        Some(TYPE_VALUE) => FieldKind::Value,
        Some(TYPE_LINK) => match tag {
            Some(TAG_HEALTH) => FieldKind::HealthLink {
                label: label_text(record.get("value")),
            },
            Some(TAG_ALL_ACTIVITIES) => FieldKind::AllActivitiesLink,
            _ => {
                log::debug!("unrecognized link tag {:?} on field {}", tag, id);
                FieldKind::UnsupportedLink
            }
        },
        other => {
            log::debug!("unrecognized field type {:?} on field {}", other, id);
            FieldKind::UnsupportedType
        }
    };

    Ok(Field {
        id,
        kind,
        raw: raw.clone(),
    })
}

/// Field values are expected to be strings when used as labels; anything
/// else falls back to its JSON rendering rather than failing.
fn label_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn require_id(record: &Map<String, Value>) -> DiaryResult<u64> {
    record
        .get(ID_KEY)
        .and_then(Value::as_u64)
        .ok_or(DiaryError::MissingId)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a record",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::assign_ids;
    use serde_json::json;

    fn classified(raw: Value) -> Document {
        classify_document(&assign_ids(&raw)).expect("well-formed document")
    }

    #[test]
    fn test_classify_drops_nothing_and_keeps_date_label() {
        let doc = classified(json!([
            "2020-06-01",
            [{ "tag": "diary", "value": "Diary" }],
            [{ "tag": "totals", "value": "Totals" }]
        ]));
        assert_eq!(doc.date_label, json!("2020-06-01"));
        assert_eq!(doc.entries.len(), 2);
        assert_eq!(doc.entries[0].head().label, "Diary");
        assert_eq!(doc.entries[1].head().label, "Totals");
    }

    #[test]
    fn test_classify_field_kinds() {
        let doc = classified(json!([
            "label",
            [
                { "tag": "diary", "value": "Diary" },
                { "type": "value", "value": 42 },
                { "type": "link", "tag": "health", "value": "Health" },
                { "type": "link", "tag": "all-activities", "value": "All" },
                { "type": "link", "tag": "mystery", "value": "?" },
                { "type": "gadget" }
            ]
        ]));
        let Subtree::Section(section) = &doc.entries[0] else {
            panic!("expected a generic section");
        };
        let kinds: Vec<&FieldKind> = section
            .children
            .iter()
            .map(|n| match n {
                Node::Field(f) => &f.kind,
                other => panic!("expected field, got {:?}", other),
            })
            .collect();
        assert_eq!(kinds[0], &FieldKind::Value);
        assert_eq!(
            kinds[1],
            &FieldKind::HealthLink {
                label: "Health".to_string()
            }
        );
        assert_eq!(kinds[2], &FieldKind::AllActivitiesLink);
        assert_eq!(kinds[3], &FieldKind::UnsupportedLink);
        assert_eq!(kinds[4], &FieldKind::UnsupportedType);
    }

    #[test]
    fn test_shrimp_children_keep_raw_payload() {
        let doc = classified(json!([
            "label",
            [
                { "tag": "shrimp", "value": "Shrimp" },
                [{ "tag": "inner", "value": "Inner" }, { "type": "value", "value": 1 }]
            ]
        ]));
        let Subtree::Section(section) = &doc.entries[0] else {
            panic!("expected a generic section");
        };
        let Node::Shrimp(shrimp) = &section.children[0] else {
            panic!("expected shrimp routing under a shrimp parent");
        };
        // Payload is the whole nested sequence, head included.
        let payload = shrimp.payload.as_array().unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0]["tag"], json!("inner"));
    }

    #[test]
    fn test_jupyter_rest_stays_opaque() {
        let doc = classified(json!([
            "label",
            [
                { "tag": "diary", "value": "Diary" },
                [
                    { "tag": "jupyter-activity", "value": "Activity" },
                    { "anything": ["goes", { "here": true }] },
                    "even a bare scalar"
                ]
            ]
        ]));
        let Subtree::Section(section) = &doc.entries[0] else {
            panic!("expected a generic section");
        };
        let Node::Subtree(Subtree::Jupyter(jupyter)) = &section.children[0] else {
            panic!("expected a jupyter section");
        };
        // A bare scalar would be a classification error anywhere else; inside
        // a jupyter payload it is untouched.
        assert_eq!(jupyter.payload.len(), 2);
        assert_eq!(jupyter.payload[1], json!("even a bare scalar"));
    }

    #[test]
    fn test_missing_id_is_a_precondition_violation() {
        let raw = json!(["label", [{ "tag": "diary", "value": "Diary" }]]);
        // No id pass.
        assert_eq!(classify_document(&raw), Err(DiaryError::MissingId));
    }

    #[test]
    fn test_malformed_head_is_rejected() {
        let raw = assign_ids(&json!(["label", [{ "value": "no tag here" }]]));
        assert!(matches!(
            classify_document(&raw),
            Err(DiaryError::MalformedHead { .. })
        ));
    }

    #[test]
    fn test_scalar_in_rest_is_rejected() {
        let raw = assign_ids(&json!([
            "label",
            [{ "tag": "diary", "value": "Diary" }, "stray"]
        ]));
        assert!(matches!(
            classify_document(&raw),
            Err(DiaryError::UnexpectedShape { .. })
        ));
    }

    #[test]
    fn test_empty_document_and_non_sequence_are_rejected() {
        assert_eq!(classify_document(&json!([])), Err(DiaryError::EmptyDocument));
        assert!(matches!(
            classify_document(&json!({ "not": "a sequence" })),
            Err(DiaryError::NotASequence { .. })
        ));
    }
}
