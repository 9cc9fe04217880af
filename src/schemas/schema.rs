use schemars::schema::{ObjectValidation, RootSchema, Schema, SchemaObject};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{any::TypeId, sync::Arc};

/// Cached JSON schema handle associated with a structured content record.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    pub fn from_root_schema<T: 'static>(
        schema_name: &'static str,
        type_name: &'static str,
        root: RootSchema,
    ) -> Self {
        // A RootSchema is plain data; serializing it cannot fail.
        let schema_json = serde_json::to_value(root).unwrap_or(Value::Null);

        Self {
            schema_name,
            type_name,
            type_id: TypeId::of::<T>(),
            schema_json: Arc::new(schema_json),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }

    /// Top-level fields as `(name, type, description)`, sorted by name.
    pub fn fields(&self) -> Vec<(String, String, Option<String>)> {
        let Some(properties) = self.schema_json.get("properties").and_then(Value::as_object)
        else {
            return Vec::new();
        };

        properties
            .iter()
            .map(|(name, property)| {
                let description = property
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                (name.clone(), describe_type(property), description)
            })
            .collect()
    }
}

/// Implemented by `#[content_schema]` for every structured content record.
///
/// `Default` supplies the empty value lenient decoding fills missing fields
/// from; `Serialize` lets that default be merged as JSON.
pub trait ContentSchema: DeserializeOwned + Serialize + Default + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Apply doc comments captured by the procedural macro to the generated schema metadata.
pub fn apply_doc_comments(
    root: &mut RootSchema,
    title: &'static str,
    description: Option<&'static str>,
    field_docs: &[(&'static str, &'static str)],
) {
    let schema_object = &mut root.schema;
    apply_struct_metadata(schema_object, title, description);

    if let Some(object_validation) = schema_object.object.as_mut() {
        apply_field_metadata(object_validation.as_mut(), field_docs);
    }
}

fn apply_struct_metadata(
    schema_object: &mut SchemaObject,
    title: &'static str,
    description: Option<&'static str>,
) {
    let metadata = schema_object.metadata();

    if metadata.title.is_none() {
        metadata.title = Some(title.to_string());
    }

    if let Some(description) = description {
        if metadata.description.is_none() {
            metadata.description = Some(description.to_string());
        }
    }
}

fn apply_field_metadata(
    object_validation: &mut ObjectValidation,
    field_docs: &[(&'static str, &'static str)],
) {
    for (field, doc) in field_docs {
        if let Some(Schema::Object(field_object)) = object_validation.properties.get_mut(*field) {
            let metadata = field_object.metadata();
            if metadata.description.is_none() {
                metadata.description = Some((*doc).to_string());
            }
        }
    }
}

fn describe_type(property: &Value) -> String {
    if let Some(reference) = property.get("$ref").and_then(Value::as_str) {
        let name = reference.rsplit('/').next().unwrap_or(reference);
        return format!("{name} object");
    }

    match property.get("type").and_then(Value::as_str) {
        Some("array") => {
            let item = property
                .get("items")
                .map(describe_type)
                .unwrap_or_else(|| "value".to_string());
            format!("list of {item}s")
        }
        Some(other) => other.to_string(),
        None => "value".to_string(),
    }
}
