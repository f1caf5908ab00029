//! Response Reconciler — raw completion text → typed, schema-valid result.
//!
//! Flow: strict parse (fast path) → fence stripping → boundary extraction →
//!       strict parse of the slice → syntax repair → parse → normalize → deserialize.
//!
//! Every step is total. A failure here is never fatal: the orchestrator treats it like an
//! unavailable backend and switches to the fallback generator.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::analysis::normalize::normalize;
use crate::analysis::repair::{repair, strip_code_fences};
use crate::analysis::schema::{PayloadShape, SchemaSpec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationFailure {
    #[error("no JSON payload found in completion")]
    NoJsonFound,

    #[error("completion payload could not be parsed: {0}")]
    Unparseable(String),
}

/// Reconciles a raw completion into `T` using `schema`.
pub fn reconcile<T: DeserializeOwned>(
    raw: &str,
    schema: &SchemaSpec,
) -> Result<T, ReconciliationFailure> {
    let payload = extract_payload(raw, schema.shape)?;
    let normalized = normalize(&payload, schema);
    serde_json::from_value(normalized)
        .map_err(|e| ReconciliationFailure::Unparseable(format!("schema mismatch: {e}")))
}

/// Extracts the loosely-typed payload tree from raw completion text.
pub fn extract_payload(raw: &str, shape: PayloadShape) -> Result<Value, ReconciliationFailure> {
    if let Some(value) = parse_strict(raw.trim(), shape) {
        return Ok(value);
    }

    let unfenced = strip_code_fences(raw);
    let sliced = slice_payload(&unfenced, shape).ok_or(ReconciliationFailure::NoJsonFound)?;

    if let Some(value) = parse_strict(sliced, shape) {
        return Ok(value);
    }

    let repaired = repair(sliced);
    let value: Value = serde_json::from_str(&repaired)
        .map_err(|e| ReconciliationFailure::Unparseable(e.to_string()))?;

    if shape.matches(&value) {
        Ok(value)
    } else {
        Err(ReconciliationFailure::Unparseable(format!(
            "expected a JSON {shape:?} at the root"
        )))
    }
}

fn parse_strict(text: &str, shape: PayloadShape) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(|v| shape.matches(v))
}

/// Slices from the first opening delimiter to the last closing one.
fn slice_payload(text: &str, shape: PayloadShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}
