//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod form_schema_directory;
mod in_memory_form_schema_catalog;

pub use form_schema_directory::load_form_schemas_from_dir;
pub use in_memory_form_schema_catalog::InMemoryFormSchemaCatalog;
