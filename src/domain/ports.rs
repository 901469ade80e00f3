use crate::domain::query::{SelectQuery, TextSearchType};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the hosted relational backend.
///
/// Implementations return rows as JSON objects with embedded resources nested
/// under their alias. Hard failures (transport, rejected query) are errors;
/// "no matching rows" is `Ok(vec![])`.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<serde_json::Value>>;
}

pub trait ConfigProvider: Send + Sync {
    fn backend_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn schema(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn text_search_type(&self) -> TextSearchType;
    fn text_search_config(&self) -> Option<&str>;
}
