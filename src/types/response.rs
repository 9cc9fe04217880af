use std::any::{type_name, TypeId};

use serde_json::Value;

use crate::{
    error::{ContentError, Result},
    schemas::{
        validation::{fill_missing_fields, validate_structured_payload},
        ContentSchema, SchemaHandle, ShapeValidation,
    },
};

/// Decode completion text into a structured record.
///
/// The JSON object may be wrapped in a code fence or surrounded by prose.
/// In strict mode it must match the record's schema; in lenient mode missing
/// fields are filled from `T::default()` before deserializing.
pub fn decode_structured<T>(text: &str, mode: ShapeValidation) -> Result<T>
where
    T: ContentSchema,
{
    let schema = T::schema();
    let payload = extract_json_object(text)?;

    let payload = match mode {
        ShapeValidation::Strict => {
            validate_structured_payload(schema, &payload)?;
            payload
        }
        ShapeValidation::Lenient => {
            fill_missing_fields(payload, serde_json::to_value(T::default())?)
        }
    };

    deserialize_structured_response::<T>(&payload, schema)
}

pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: ContentSchema,
{
    ensure_schema_matches::<T>(schema)?;

    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ContentError::Decode(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })?;

    Ok(value)
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    let expected = TypeId::of::<T>();
    if schema.type_id() != expected {
        return Err(ContentError::Validation(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}

/// Locate and parse the JSON object in a completion.
pub(crate) fn extract_json_object(text: &str) -> Result<Value> {
    let trimmed = strip_code_fence(text.trim());

    let start = trimmed.find('{');
    let end = trimmed.rfind('}');
    let candidate = match (start, end) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => {
            return Err(ContentError::Decode(
                "completion does not contain a JSON object".to_string(),
            ))
        }
    };

    let value: Value = serde_json::from_str(candidate)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(ContentError::Decode(
            "completion JSON is not an object".to_string(),
        ))
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (```json) along with the fence. A fence on a
    // single line has no info string to drop.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Split a completion into list items.
///
/// Blank lines are dropped, as are leading bullet or number markers that are
/// followed by whitespace ("- ", "* ", "• ", "3. ", "3) ").
pub fn split_content_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| strip_list_marker(line.trim()).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest;
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        for marker in [". ", ") "] {
            if let Some(item) = rest.strip_prefix(marker) {
                return item;
            }
        }
    }

    line
}
