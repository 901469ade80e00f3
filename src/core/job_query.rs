use crate::core::QueryBackend;
use crate::domain::model::Job;
use crate::domain::query::{SelectQuery, TextSearchType};
use crate::utils::error::Result;
use std::sync::Arc;

pub const JOBS_TABLE: &str = "jobs";
pub const COMPANIES_TABLE: &str = "companies";
pub const JOB_COLUMNS: [&str; 5] = ["id", "title", "description", "type", "fts"];
pub const COMPANY_COLUMNS: [&str; 2] = ["id", "name"];
pub const SEARCH_COLUMN: &str = "fts";
pub const ORDER_COLUMN: &str = "title";

/// Composes and runs the job listing query against a [`QueryBackend`].
pub struct JobQueryService {
    backend: Arc<dyn QueryBackend>,
    search_type: TextSearchType,
    search_config: Option<String>,
}

impl JobQueryService {
    pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            backend,
            search_type: TextSearchType::default(),
            search_config: None,
        }
    }

    pub fn with_text_search(mut self, search_type: TextSearchType, config: Option<String>) -> Self {
        self.search_type = search_type;
        self.search_config = config;
        self
    }

    /// Builds the jobs query. An empty `search_text` adds no text predicate.
    pub fn build_query(&self, search_text: &str) -> SelectQuery {
        let mut query = SelectQuery::from_table(JOBS_TABLE)
            .select(JOB_COLUMNS)
            .embed("company", COMPANIES_TABLE, COMPANY_COLUMNS);

        if !search_text.is_empty() {
            query = query.text_search(
                SEARCH_COLUMN,
                search_text,
                self.search_type,
                self.search_config.clone(),
            );
        }

        query.order(ORDER_COLUMN, true)
    }

    /// Fetches every matching job, ordered by title, each with its company.
    pub async fn fetch_jobs(&self, search_text: &str) -> Result<Vec<Job>> {
        let query = self.build_query(search_text);
        tracing::debug!(search_text, "Fetching jobs: {:?}", query.to_params());

        let rows = self.backend.select(&query).await?;
        let total = rows.len();

        let mut jobs = Vec::with_capacity(total);
        for row in rows {
            // 沒有公司資料的職缺不顯示
            if row.get("company").map_or(true, |c| c.is_null()) {
                tracing::warn!(
                    "Skipping job {} without a company",
                    row.get("id").map(|id| id.to_string()).unwrap_or_default()
                );
                continue;
            }
            jobs.push(serde_json::from_value::<Job>(row)?);
        }

        tracing::debug!("Fetched {} jobs ({} rows)", jobs.len(), total);
        Ok(jobs)
    }
}
