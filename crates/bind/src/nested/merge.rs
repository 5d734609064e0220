use serde_json::{Map, Value};
use tracing::trace;

/// Merges `from` into `into`.
///
/// Objects merge key by key, arrays concatenate, and any other pairing resolves to `from`,
/// so the later submission wins.
pub(crate) fn merge(into: Value, from: Value) -> Value {
    match (into, from) {
        (Value::Object(mut into), Value::Object(from)) => {
            merge_map(&mut into, from);
            Value::Object(into)
        }
        (Value::Array(mut into), Value::Array(from)) => {
            into.extend(from);
            Value::Array(into)
        }
        (_, from) => from,
    }
}

fn merge_map(into: &mut Map<String, Value>, from: Map<String, Value>) {
    for (key, value) in from {
        match into.get_mut(&key) {
            Some(existing) => {
                if !same_container(existing, &value) {
                    trace!(key, "overwrite value which can not be merged");
                }
                let previous = existing.take();
                *existing = merge(previous, value);
            }
            None => {
                into.insert(key, value);
            }
        }
    }
}

fn same_container(a: &Value, b: &Value) -> bool {
    matches!((a, b), (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_)))
}
