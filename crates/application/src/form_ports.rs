use std::sync::Arc;

use async_trait::async_trait;
use formwork_core::AppResult;
use formwork_domain::FormSchema;

/// Catalog port for the form schemas a host serves.
///
/// Schemas are shared read-only across requests.
#[async_trait]
pub trait FormSchemaCatalog: Send + Sync {
    /// Looks up a schema by base id.
    async fn find_schema(&self, base_id: &str) -> AppResult<Option<Arc<FormSchema>>>;

    /// Lists every known base id, sorted.
    async fn list_base_ids(&self) -> AppResult<Vec<String>>;
}
