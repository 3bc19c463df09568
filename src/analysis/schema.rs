//! Schema helpers shared by the analysis kinds.
//!
//! Schemas are authored once as JSON Schema; each provider adapter converts
//! them to its own dialect. Validation on the way back is done by serde:
//! a missing required field, a wrong type, or an enum value outside the set
//! fails deserialization and is reported as a schema violation.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

/// `{ "type": "string" }`, optionally with a description.
pub(crate) fn string(description: Option<&str>) -> Value {
    with_description(json!({ "type": "string" }), description)
}

pub(crate) fn number(description: Option<&str>) -> Value {
    with_description(json!({ "type": "number" }), description)
}

pub(crate) fn boolean(description: Option<&str>) -> Value {
    with_description(json!({ "type": "boolean" }), description)
}

pub(crate) fn string_enum(values: &[&str]) -> Value {
    json!({ "type": "string", "enum": values })
}

/// Closed object schema; every listed property is required.
pub(crate) fn object(properties: &[(&str, Value)]) -> Value {
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
    let props: Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| ((*name).to_string(), schema.clone()))
        .collect();
    json!({
        "type": "object",
        "properties": props,
        "required": required,
        "additionalProperties": false
    })
}

pub(crate) fn array_of(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

fn with_description(mut schema: Value, description: Option<&str>) -> Value {
    if let (Some(desc), Some(obj)) = (description, schema.as_object_mut()) {
        obj.insert("description".into(), Value::String(desc.to_string()));
    }
    schema
}

/// Parse the model's text as `T`. The error string is the serde message.
pub(crate) fn parse<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("empty response".to_string());
    }
    serde_json::from_str(trimmed).map_err(|e| e.to_string())
}

/// Clamp a model-reported percentage into `[0, 100]`.
pub(crate) fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
