//! Id pass: stamps a stable identifier on every record node of the raw
//! diary tree before classification.
//!
//! Ids are assigned in document order, so the pass is deterministic: running
//! it twice on the same document produces identical ids, which keeps
//! presentation-tree identity stable across re-renders.

use serde_json::{Map, Value};

/// Key under which identifiers are stamped.
pub const ID_KEY: &str = "id";

/// Returns a copy of the raw tree with an `id` stamped on every record node.
///
/// The input is never mutated. Only sequence elements are treated as tree
/// structure; the interior of a record's values is payload and is left
/// untouched.
pub fn assign_ids(raw: &Value) -> Value {
    let mut next: u64 = 0;
    stamp(raw, &mut next)
}

fn stamp(value: &Value, next: &mut u64) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(|v| stamp(v, next)).collect()),
        Value::Object(record) => {
            let id = *next;
            *next += 1;
            let mut stamped: Map<String, Value> = record.clone();
            stamped.insert(ID_KEY.to_string(), Value::from(id));
            Value::Object(stamped)
        }
        other => other.clone(),
    }
}
