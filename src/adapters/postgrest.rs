use crate::core::{ConfigProvider, QueryBackend};
use crate::domain::query::SelectQuery;
use crate::utils::error::{JobBoardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REST_PATH: &str = "rest/v1";

/// Error body returned by PostgREST on a rejected request.
#[derive(Debug, Default, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// [`QueryBackend`] over the PostgREST HTTP API of a hosted project.
#[derive(Debug, Clone)]
pub struct PostgrestBackend {
    client: Client,
    base_url: String,
    api_key: String,
    schema: Option<String>,
}

impl PostgrestBackend {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(base_url, api_key, None, Duration::from_secs(10))
    }

    pub fn with_options(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        schema: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            schema,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::with_options(
            config.backend_url(),
            config.api_key(),
            config.schema().map(str::to_string),
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }
}

#[async_trait]
impl QueryBackend for PostgrestBackend {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<serde_json::Value>> {
        let url = self.table_url(&query.table);
        let params = query.to_params();
        tracing::debug!("Making API request to: {} {:?}", url, params);

        let mut request = self
            .client
            .get(&url)
            .query(&params)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json");
        if let Some(schema) = &self.schema {
            request = request.header("Accept-Profile", schema);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: PostgrestErrorBody = serde_json::from_str(&text).unwrap_or_default();
            return Err(JobBoardError::QueryError {
                status: status.as_u16(),
                code: body.code,
                message: body.message.unwrap_or_else(|| {
                    if text.is_empty() {
                        status.to_string()
                    } else {
                        text.clone()
                    }
                }),
                details: body.details,
                hint: body.hint,
            });
        }

        // 後端以 JSON 陣列回傳資料列
        let rows: Vec<serde_json::Value> = response.json().await?;
        Ok(rows)
    }
}
