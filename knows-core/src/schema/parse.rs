//! JSON validation for schema documents.

use serde_json::{Map, Value};

use super::{ComputedKind, ComputedProperty, PropertyDefinition, Schema, SchemaProperty};
use crate::{
    error::SchemaError,
    registry::{Bound, ChoiceSet, Constraints, TypeRegistry, ValueGenerator},
    value::PropertyValue,
};

const NODE_LABEL: &str = "nodeLabel";
const EDGE_LABEL: &str = "edgeLabel";
const NODE_PROPERTIES: &str = "nodeProperties";
const EDGE_PROPERTIES: &str = "edgeProperties";
const COMPUTED_NODE_PROPERTIES: &str = "computedNodeProperties";

const DEFINITION_KEYS: [&str; 7] = [
    "type",
    "enum",
    "min",
    "max",
    "precision",
    "maxLength",
    "symmetric",
];

pub(super) fn parse_document(
    document: &Value,
    registry: &TypeRegistry,
) -> Result<Schema, SchemaError> {
    let Value::Object(object) = document else {
        return Err(SchemaError::NotAnObject);
    };
    let mut schema = Schema::default();
    for (key, value) in object {
        match key.as_str() {
            NODE_LABEL => schema.node_label = parse_label(NODE_LABEL, value)?,
            EDGE_LABEL => schema.edge_label = parse_label(EDGE_LABEL, value)?,
            NODE_PROPERTIES => {
                schema.node_properties = parse_properties(NODE_PROPERTIES, value, registry)?;
            }
            EDGE_PROPERTIES => {
                schema.edge_properties = parse_properties(EDGE_PROPERTIES, value, registry)?;
            }
            COMPUTED_NODE_PROPERTIES => {
                schema.computed_node_properties = parse_computed(value)?;
            }
            _ => return Err(SchemaError::UnknownKey { path: key.clone() }),
        }
    }
    Ok(schema)
}

fn parse_label(field: &'static str, value: &Value) -> Result<String, SchemaError> {
    match value {
        Value::String(label) if label.is_empty() => Err(SchemaError::EmptyLabel { field }),
        Value::String(label) => Ok(label.clone()),
        _ => Err(SchemaError::WrongType {
            field: field.to_owned(),
            expected: "a string",
        }),
    }
}

fn section<'a>(field: &str, value: &'a Value) -> Result<&'a Map<String, Value>, SchemaError> {
    value.as_object().ok_or_else(|| SchemaError::WrongType {
        field: field.to_owned(),
        expected: "an object",
    })
}

fn parse_properties(
    field: &str,
    value: &Value,
    registry: &TypeRegistry,
) -> Result<Vec<SchemaProperty>, SchemaError> {
    section(field, value)?
        .iter()
        .map(|(name, raw)| {
            let path = format!("{field}.{name}");
            let definition = parse_definition(&path, raw)?;
            let generator = resolve(&path, &definition, registry)?;
            Ok(SchemaProperty {
                name: name.clone(),
                definition,
                generator,
            })
        })
        .collect()
}

fn parse_computed(value: &Value) -> Result<Vec<ComputedProperty>, SchemaError> {
    section(COMPUTED_NODE_PROPERTIES, value)?
        .iter()
        .map(|(name, raw)| {
            let property = format!("{COMPUTED_NODE_PROPERTIES}.{name}");
            let Value::String(spelling) = raw else {
                return Err(SchemaError::ComputedNotString { property });
            };
            let kind = spelling
                .parse::<ComputedKind>()
                .map_err(|kind| SchemaError::UnknownComputed {
                    property,
                    kind,
                    available: ComputedKind::ALL.map(ComputedKind::as_str).join(", "),
                })?;
            Ok(ComputedProperty {
                name: name.clone(),
                kind,
            })
        })
        .collect()
}

fn parse_definition(path: &str, raw: &Value) -> Result<PropertyDefinition, SchemaError> {
    let object = match raw {
        Value::String(type_name) => return Ok(PropertyDefinition::TypeName(type_name.clone())),
        Value::Object(object) => object,
        _ => {
            return Err(SchemaError::InvalidDefinition {
                property: path.to_owned(),
                message: "expected a type name or an object",
            });
        }
    };
    if let Some(key) = object
        .keys()
        .find(|key| !DEFINITION_KEYS.contains(&key.as_str()))
    {
        return Err(SchemaError::UnknownKey {
            path: format!("{path}.{key}"),
        });
    }
    let symmetric = match object.get("symmetric") {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            return Err(SchemaError::WrongType {
                field: format!("{path}.symmetric"),
                expected: "a boolean",
            });
        }
    };
    match (object.get("type"), object.get("enum")) {
        (Some(_), Some(_)) => Err(SchemaError::InvalidDefinition {
            property: path.to_owned(),
            message: "'type' and 'enum' cannot be combined",
        }),
        (None, None) => Err(SchemaError::MissingTypeOrEnum {
            property: path.to_owned(),
        }),
        (None, Some(values)) => Ok(PropertyDefinition::Enum {
            values: parse_enum(path, values)?,
            symmetric,
        }),
        (Some(Value::String(type_name)), None) => Ok(PropertyDefinition::Typed {
            type_name: type_name.clone(),
            constraints: parse_constraints(path, object)?,
            symmetric,
        }),
        (Some(_), None) => Err(SchemaError::WrongType {
            field: format!("{path}.type"),
            expected: "a string",
        }),
    }
}

fn parse_enum(path: &str, values: &Value) -> Result<Vec<PropertyValue>, SchemaError> {
    let Value::Array(items) = values else {
        return Err(SchemaError::EmptyEnum {
            property: path.to_owned(),
        });
    };
    if items.is_empty() {
        return Err(SchemaError::EmptyEnum {
            property: path.to_owned(),
        });
    }
    items
        .iter()
        .map(|item| match item {
            Value::String(text) => Ok(PropertyValue::String(text.clone())),
            Value::Bool(flag) => Ok(PropertyValue::Bool(*flag)),
            Value::Number(number) => Ok(number.as_i64().map_or_else(
                || PropertyValue::Float(number.as_f64().unwrap_or_default()),
                PropertyValue::Int,
            )),
            _ => Err(SchemaError::InvalidDefinition {
                property: path.to_owned(),
                message: "enum values must be strings, numbers or booleans",
            }),
        })
        .collect()
}

fn parse_constraints(path: &str, object: &Map<String, Value>) -> Result<Constraints, SchemaError> {
    Ok(Constraints {
        min: parse_bound(path, "min", object.get("min"))?,
        max: parse_bound(path, "max", object.get("max"))?,
        precision: parse_count(path, "precision", object.get("precision"))?,
        max_length: parse_count(path, "maxLength", object.get("maxLength"))?,
    })
}

fn parse_bound(path: &str, key: &str, raw: Option<&Value>) -> Result<Option<Bound>, SchemaError> {
    match raw {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(Bound::Text(text.clone()))),
        Some(Value::Number(number)) => Ok(Some(number.as_i64().map_or_else(
            || Bound::Float(number.as_f64().unwrap_or_default()),
            Bound::Integer,
        ))),
        Some(_) => Err(SchemaError::WrongType {
            field: format!("{path}.{key}"),
            expected: "a number or string",
        }),
    }
}

fn parse_count<T: TryFrom<u64>>(
    path: &str,
    key: &str,
    raw: Option<&Value>,
) -> Result<Option<T>, SchemaError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    value
        .as_u64()
        .and_then(|count| T::try_from(count).ok())
        .map(Some)
        .ok_or_else(|| SchemaError::WrongType {
            field: format!("{path}.{key}"),
            expected: "a non-negative integer",
        })
}

fn resolve(
    path: &str,
    definition: &PropertyDefinition,
    registry: &TypeRegistry,
) -> Result<ValueGenerator, SchemaError> {
    let resolved = match definition {
        PropertyDefinition::TypeName(type_name) => {
            registry.generator(type_name, &Constraints::default())
        }
        PropertyDefinition::Typed {
            type_name,
            constraints,
            ..
        } => registry.generator(type_name, constraints),
        PropertyDefinition::Enum { values, .. } => {
            return ChoiceSet::new(values.clone())
                .map(ValueGenerator::Choice)
                .ok_or_else(|| SchemaError::EmptyEnum {
                    property: path.to_owned(),
                });
        }
    };
    resolved.map_err(|error| SchemaError::from_registry(path, error))
}
