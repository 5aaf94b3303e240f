use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use formwork_application::FormSchemaCatalog;
use formwork_core::{AppError, AppResult};
use formwork_domain::FormSchema;
use tokio::sync::RwLock;

/// In-memory form schema catalog.
#[derive(Debug, Default)]
pub struct InMemoryFormSchemaCatalog {
    schemas: RwLock<BTreeMap<String, Arc<FormSchema>>>,
}

impl InMemoryFormSchemaCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a catalog holding the given schemas.
    ///
    /// Two schemas with the same base id are rejected.
    pub fn from_schemas(schemas: impl IntoIterator<Item = FormSchema>) -> AppResult<Self> {
        let mut by_base_id = BTreeMap::new();

        for schema in schemas {
            let base_id = schema.base_id().as_str().to_owned();
            if by_base_id.contains_key(&base_id) {
                return Err(duplicate_base_id(&base_id));
            }
            by_base_id.insert(base_id, Arc::new(schema));
        }

        Ok(Self {
            schemas: RwLock::new(by_base_id),
        })
    }

    /// Adds one schema, rejecting a base id that is already registered.
    pub async fn register(&self, schema: FormSchema) -> AppResult<()> {
        let base_id = schema.base_id().as_str().to_owned();
        let mut schemas = self.schemas.write().await;

        if schemas.contains_key(&base_id) {
            return Err(duplicate_base_id(&base_id));
        }

        schemas.insert(base_id, Arc::new(schema));
        Ok(())
    }
}

fn duplicate_base_id(base_id: &str) -> AppError {
    AppError::Validation(format!("form '{base_id}' is already registered"))
}

#[async_trait]
impl FormSchemaCatalog for InMemoryFormSchemaCatalog {
    async fn find_schema(&self, base_id: &str) -> AppResult<Option<Arc<FormSchema>>> {
        Ok(self.schemas.read().await.get(base_id).cloned())
    }

    async fn list_base_ids(&self) -> AppResult<Vec<String>> {
        Ok(self.schemas.read().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use formwork_application::FormSchemaCatalog;
    use formwork_core::AppError;
    use formwork_domain::FormSchema;
    use serde_json::json;

    use super::InMemoryFormSchemaCatalog;

    fn schema(base_id: &str) -> FormSchema {
        serde_json::from_value(json!({
            "baseId": base_id,
            "entries": { "email": { "title": "Email", "type": "email" } }
        }))
        .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn registered_schema_can_be_found() {
        let catalog = InMemoryFormSchemaCatalog::new();
        catalog
            .register(schema("contact"))
            .await
            .unwrap_or_else(|_| unreachable!());

        let found = catalog
            .find_schema("contact")
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            found.map(|schema| schema.base_id().as_str().to_owned()),
            Some("contact".to_owned())
        );
        assert!(
            catalog
                .find_schema("missing")
                .await
                .unwrap_or_else(|_| unreachable!())
                .is_none()
        );
    }

    #[tokio::test]
    async fn base_ids_are_listed_sorted() {
        let catalog = InMemoryFormSchemaCatalog::from_schemas([schema("signup"), schema("contact")])
            .unwrap_or_else(|_| unreachable!());

        let base_ids = catalog
            .list_base_ids()
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(base_ids, vec!["contact".to_owned(), "signup".to_owned()]);
    }

    #[tokio::test]
    async fn duplicate_base_ids_are_rejected() {
        assert!(matches!(
            InMemoryFormSchemaCatalog::from_schemas([schema("contact"), schema("contact")]),
            Err(AppError::Validation(_))
        ));

        let catalog = InMemoryFormSchemaCatalog::from_schemas([schema("contact")])
            .unwrap_or_else(|_| unreachable!());
        assert!(matches!(
            catalog.register(schema("contact")).await,
            Err(AppError::Validation(_))
        ));
    }
}
