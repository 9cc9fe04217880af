pub mod schema;
pub(crate) mod validation;

pub use schema::{apply_doc_comments, ContentSchema, SchemaHandle};
pub use validation::ShapeValidation;
