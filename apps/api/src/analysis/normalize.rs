//! Schema normalization — walks a parsed payload against a `SchemaSpec`.
//!
//! Total and idempotent: any `Value` maps to a value containing exactly the schema's
//! fields, each coerced to its kind. Unknown fields are dropped.

use serde_json::{Map, Value};

use crate::analysis::schema::{FieldKind, PayloadShape, SchemaSpec};

/// Normalizes a root payload. Array-shaped schemas normalize every item.
pub fn normalize(value: &Value, schema: &SchemaSpec) -> Value {
    match schema.shape {
        PayloadShape::Object => normalize_object(value, schema),
        PayloadShape::Array => normalize_list(value, schema),
    }
}

fn normalize_object(value: &Value, schema: &SchemaSpec) -> Value {
    let empty = Map::new();
    let source = value.as_object().unwrap_or(&empty);

    let mut out = Map::with_capacity(schema.fields.len());
    for field in schema.fields {
        let raw = source.get(field.name).unwrap_or(&Value::Null);
        out.insert(field.name.to_string(), normalize_field(raw, &field.kind));
    }
    Value::Object(out)
}

fn normalize_field(raw: &Value, kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Text => Value::String(coerce_text(raw).unwrap_or_default()),
        FieldKind::Count => Value::from(coerce_count(raw)),
        FieldKind::Score => Value::from(coerce_score(raw)),
        FieldKind::Enum(policy) => {
            let resolved = match raw {
                Value::String(s) => policy.resolve(s),
                _ => policy.default,
            };
            Value::String(resolved.to_string())
        }
        FieldKind::TextList => match raw {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .filter_map(coerce_text)
                    .filter(|s| !s.is_empty())
                    .map(Value::String)
                    .collect(),
            ),
            _ => Value::Array(Vec::new()),
        },
        FieldKind::List(item_schema) => normalize_list(raw, item_schema),
        FieldKind::Object(inner) => normalize_object(raw, inner),
    }
}

/// Objects are normalized; bare strings are promoted into the item schema's first text
/// field; anything else is dropped.
fn normalize_list(raw: &Value, item_schema: &SchemaSpec) -> Value {
    let Value::Array(items) = raw else {
        return Value::Array(Vec::new());
    };

    let promoted_field = item_schema.primary_text_field();
    let normalized = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(_) => Some(normalize_object(item, item_schema)),
            Value::String(s) if !s.trim().is_empty() => promoted_field.map(|name| {
                let mut promoted = Map::new();
                promoted.insert(name.to_string(), Value::String(s.trim().to_string()));
                normalize_object(&Value::Object(promoted), item_schema)
            }),
            _ => None,
        })
        .collect();
    Value::Array(normalized)
}

fn coerce_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn coerce_count(raw: &Value) -> u32 {
    coerce_number(raw)
        .map(|n| n.round().clamp(0.0, u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Out-of-range scores are clamped, never rejected.
fn coerce_score(raw: &Value) -> u8 {
    coerce_number(raw)
        .map(|n| n.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}
