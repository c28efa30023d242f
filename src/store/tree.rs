use serde_json::{Map, Value};

use super::path::join_path;

/// Brings a value into stored form: arrays become index-keyed objects, nulls
/// are dropped and objects left empty collapse to null.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Array(items) => normalize(Value::Object(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        )),
        Value::Object(map) => {
            let map: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| {
                    let v = normalize(v);
                    (!v.is_null()).then_some((k, v))
                })
                .collect();
            if map.is_empty() {
                Value::Null
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}

pub fn get_in<S: AsRef<str>>(node: &Value, path: &[S]) -> Value {
    let mut current = node;
    for key in path {
        match current.get(key.as_ref()) {
            Some(child) => current = child,
            None => return Value::Null,
        }
    }
    current.clone()
}

/// Replaces the subtree at `path` with an already normalized `value`,
/// pruning ancestors that end up empty.
pub fn set_in<S: AsRef<str>>(node: &mut Value, path: &[S], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        *node = value;
        return;
    };

    if !node.is_object() {
        if value.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }

    if let Value::Object(map) = node {
        let key = head.as_ref();
        let child = map.entry(key.to_string()).or_insert(Value::Null);
        set_in(child, rest, value);
        let prune = child.is_null();
        if prune {
            map.remove(key);
        }
        if map.is_empty() {
            *node = Value::Null;
        }
    }
}

/// Collects every scalar leaf under `prefix` as (path, value) pairs.
pub fn flatten(prefix: &[String], value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, child) in map {
                let mut path = prefix.to_vec();
                path.push(key.clone());
                flatten(&path, child, out);
            }
        }
        scalar => out.push((join_path(prefix), scalar.clone())),
    }
}

/// Returns true when one path is an ancestor of, or equal to, the other.
pub fn overlaps<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B]) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| x.as_ref() == y.as_ref())
}
