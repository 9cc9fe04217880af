use std::{fmt, str::FromStr};

use crate::{error::ContentError, schemas::SchemaHandle};
use jsonschema::{Draft, JSONSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// How decoded structured payloads are checked against their record shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeValidation {
    /// Reject payloads that miss or mistype a field; the fallback is used instead.
    #[default]
    Strict,
    /// Pass payloads through, filling missing fields with empty values.
    Lenient,
}

impl FromStr for ShapeValidation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ShapeValidation::Strict),
            "lenient" => Ok(ShapeValidation::Lenient),
            other => Err(format!(
                "unknown shape validation `{other}` (expected `strict` or `lenient`)"
            )),
        }
    }
}

impl fmt::Display for ShapeValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeValidation::Strict => f.write_str("strict"),
            ShapeValidation::Lenient => f.write_str("lenient"),
        }
    }
}

/// Validate a structured payload against a schema
pub(crate) fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> std::result::Result<(), ContentError> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            ContentError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema.schema_name(),
                err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "structured payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(ContentError::Validation(format!(
            "Structured payload does not match `{}` schema: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}

/// Copy every top-level field of `defaults` that `payload` lacks.
///
/// Fields the payload already has are left untouched, including ones the
/// record does not know about.
pub(crate) fn fill_missing_fields(mut payload: Value, defaults: Value) -> Value {
    if let (Some(target), Value::Object(defaults)) = (payload.as_object_mut(), defaults) {
        for (key, value) in defaults {
            target.entry(key).or_insert(value);
        }
    }
    payload
}
