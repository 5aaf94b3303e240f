use std::path::{Path, PathBuf};

use formwork_core::{AppError, AppResult};
use formwork_domain::FormSchema;
use tracing::{debug, info};

use crate::InMemoryFormSchemaCatalog;

/// Reads every `*.json` schema document in a directory.
///
/// Files are read in name order; other files are ignored. A document that
/// fails to decode or validate fails the whole load.
pub async fn load_form_schemas_from_dir(dir: &Path) -> AppResult<Vec<FormSchema>> {
    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(|error| {
        AppError::Configuration(format!(
            "failed to read form schema directory '{}': {error}",
            dir.display()
        ))
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(dir_entry) = read_dir.next_entry().await.map_err(|error| {
        AppError::Internal(format!(
            "failed to list form schema directory '{}': {error}",
            dir.display()
        ))
    })? {
        let path = dir_entry.path();
        if path.extension().is_some_and(|extension| extension == "json") {
            paths.push(path);
        } else {
            debug!(path = %path.display(), "ignoring non-json file in schema directory");
        }
    }
    paths.sort();

    let mut schemas = Vec::with_capacity(paths.len());
    for path in paths {
        schemas.push(read_schema_document(&path).await?);
    }

    info!(
        dir = %dir.display(),
        schema_count = schemas.len(),
        "loaded form schemas"
    );

    Ok(schemas)
}

impl InMemoryFormSchemaCatalog {
    /// Creates a catalog from every schema document in a directory.
    pub async fn load_from_dir(dir: &Path) -> AppResult<Self> {
        Self::from_schemas(load_form_schemas_from_dir(dir).await?)
    }
}

async fn read_schema_document(path: &Path) -> AppResult<FormSchema> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Configuration(format!(
            "failed to read form schema '{}': {error}",
            path.display()
        ))
    })?;

    serde_json::from_str(&contents).map_err(|error| {
        AppError::Validation(format!(
            "invalid form schema '{}': {error}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use formwork_application::FormSchemaCatalog;
    use formwork_core::AppError;
    use tempfile::TempDir;

    use super::load_form_schemas_from_dir;
    use crate::InMemoryFormSchemaCatalog;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap_or_else(|_| unreachable!());
    }

    fn schema_document(base_id: &str) -> String {
        format!(
            r#"{{ "baseId": "{base_id}", "entries": {{ "email": {{ "title": "Email", "type": "email" }} }} }}"#
        )
    }

    #[tokio::test]
    async fn loads_json_documents_in_name_order() {
        let dir = TempDir::new().unwrap_or_else(|_| unreachable!());
        write(&dir, "b-signup.json", &schema_document("signup"));
        write(&dir, "a-contact.json", &schema_document("contact"));
        write(&dir, "notes.txt", "not a schema");

        let schemas = load_form_schemas_from_dir(dir.path())
            .await
            .unwrap_or_else(|_| unreachable!());

        let base_ids: Vec<&str> = schemas
            .iter()
            .map(|schema| schema.base_id().as_str())
            .collect();
        assert_eq!(base_ids, vec!["contact", "signup"]);
    }

    #[tokio::test]
    async fn invalid_document_fails_the_load() {
        let dir = TempDir::new().unwrap_or_else(|_| unreachable!());
        write(
            &dir,
            "broken.json",
            r#"{ "baseId": "form", "entries": { "age": { "title": "Age", "type": "decimal" } } }"#,
        );

        assert!(matches!(
            load_form_schemas_from_dir(dir.path()).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn missing_directory_is_a_configuration_error() {
        let dir = TempDir::new().unwrap_or_else(|_| unreachable!());

        assert!(matches!(
            load_form_schemas_from_dir(&dir.path().join("absent")).await,
            Err(AppError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_base_ids_across_files_are_rejected() {
        let dir = TempDir::new().unwrap_or_else(|_| unreachable!());
        write(&dir, "one.json", &schema_document("contact"));
        write(&dir, "two.json", &schema_document("contact"));

        assert!(matches!(
            InMemoryFormSchemaCatalog::load_from_dir(dir.path()).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn catalog_serves_loaded_documents() {
        let dir = TempDir::new().unwrap_or_else(|_| unreachable!());
        write(&dir, "contact.json", &schema_document("contact"));

        let catalog = InMemoryFormSchemaCatalog::load_from_dir(dir.path())
            .await
            .unwrap_or_else(|_| unreachable!());

        assert!(
            catalog
                .find_schema("contact")
                .await
                .unwrap_or_else(|_| unreachable!())
                .is_some()
        );
    }
}
