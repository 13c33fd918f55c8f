//! Attribute discovery and value conversion shared by the exporters.

use knows_core::{PropertyMap, PropertyValue, ValueKind};
use serde_json::{Map, Value};

/// Key under which element labels are exported as an attribute.
pub(crate) const LABEL_KEY: &str = "label";

/// A named attribute column and the kind of value it holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AttributeKey<'a> {
    pub(crate) name: &'a str,
    pub(crate) kind: ValueKind,
}

/// Attribute keys in first-seen order with `label` first.
///
/// A key seen with both integer and float values is a float; any other
/// disagreement falls back to string.
pub(crate) fn collect_keys<'a, I>(maps: I) -> Vec<AttributeKey<'a>>
where
    I: IntoIterator<Item = &'a PropertyMap>,
{
    let mut keys = vec![AttributeKey {
        name: LABEL_KEY,
        kind: ValueKind::String,
    }];
    for map in maps {
        for (name, value) in map.iter() {
            if let Some(key) = keys.iter_mut().find(|key| key.name == name) {
                key.kind = widen(key.kind, value.kind());
            } else {
                keys.push(AttributeKey {
                    name,
                    kind: value.kind(),
                });
            }
        }
    }
    keys
}

fn widen(current: ValueKind, next: ValueKind) -> ValueKind {
    match (current, next) {
        _ if current == next => current,
        (ValueKind::Int, ValueKind::Float) | (ValueKind::Float, ValueKind::Int) => ValueKind::Float,
        _ => ValueKind::String,
    }
}

/// Text of attribute `key` for an element, reading `label` from the element.
pub(crate) fn cell(label: &str, properties: &PropertyMap, key: &str) -> Option<String> {
    if key == LABEL_KEY {
        Some(label.to_owned())
    } else {
        properties.get(key).map(ToString::to_string)
    }
}

/// Type name of `kind` in GraphML and GEXF attribute declarations.
pub(crate) const fn markup_type(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Bool => "boolean",
        ValueKind::Int => "long",
        ValueKind::Float => "double",
        ValueKind::String => "string",
    }
}

pub(crate) fn json_value(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::String(text) => Value::from(text.as_str()),
        PropertyValue::Int(number) => Value::from(*number),
        PropertyValue::Float(number) => Value::from(*number),
        PropertyValue::Bool(flag) => Value::from(*flag),
    }
}

/// JSON object with `label` followed by the element's properties.
pub(crate) fn json_attributes(label: &str, properties: &PropertyMap) -> Map<String, Value> {
    let mut object = Map::with_capacity(properties.len() + 1);
    object.insert(LABEL_KEY.to_owned(), Value::from(label));
    for (name, value) in properties.iter() {
        object.insert(name.to_owned(), json_value(value));
    }
    object
}
