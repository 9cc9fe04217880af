mod content_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Marks a structured content record.
///
/// Implements `trip_muse::schema::ContentSchema` for the struct, caching a
/// `SchemaHandle` built from its `schemars` schema. Struct and field doc
/// comments become schema descriptions, which the prompt builders turn into
/// the JSON-shape instruction sent to the model.
///
/// Optional arguments: `name = "..."` overrides the schema name and
/// `description = "..."` overrides the struct doc comment.
#[proc_macro_attribute]
pub fn content_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    content_schema::content_schema(attr, item)
}
