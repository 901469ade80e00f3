use crate::core::QueryBackend;
use crate::domain::model::{Country, FilterState, JobType};
use crate::domain::query::SelectQuery;
use crate::utils::error::{JobBoardError, Result};
use std::sync::Arc;

pub const COUNTRIES_TABLE: &str = "countries";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTypeOption {
    pub job_type: JobType,
    pub label: &'static str,
    pub checked: bool,
}

/// Job type checkboxes plus the country list.
///
/// Countries are reference data only. Selecting one does not change the job
/// query or the [`FilterState`].
pub struct FilterPanelView {
    backend: Arc<dyn QueryBackend>,
    countries: Vec<Country>,
}

impl FilterPanelView {
    pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            backend,
            countries: Vec::new(),
        }
    }

    pub fn countries_query() -> SelectQuery {
        SelectQuery::from_table(COUNTRIES_TABLE)
            .select(["id", "name"])
            .order("name", true)
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        let rows = self.backend.select(&Self::countries_query()).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value::<Country>(row).map_err(JobBoardError::from))
            .collect()
    }

    /// Loads the country list. Failures are logged and leave the list empty.
    pub async fn load(&mut self) -> &[Country] {
        self.countries = match self.fetch_countries().await {
            Ok(countries) => {
                tracing::debug!("Loaded {} countries", countries.len());
                countries
            }
            Err(e) => {
                tracing::error!("❌ Failed to load countries: {}", e);
                Vec::new()
            }
        };
        &self.countries
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn job_type_options(filter: &FilterState) -> Vec<JobTypeOption> {
        JobType::ALL
            .into_iter()
            .map(|job_type| JobTypeOption {
                job_type,
                label: job_type.label(),
                checked: filter.selected_types.contains(&job_type),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticBackend(Option<Vec<serde_json::Value>>);

    #[async_trait]
    impl QueryBackend for StaticBackend {
        async fn select(&self, query: &SelectQuery) -> Result<Vec<serde_json::Value>> {
            assert_eq!(query.table, "countries");
            self.0.clone().ok_or_else(|| JobBoardError::QueryError {
                status: 503,
                code: None,
                message: "service unavailable".to_string(),
                details: None,
                hint: None,
            })
        }
    }

    #[test]
    fn test_countries_query_is_ordered_by_name() {
        let params = FilterPanelView::countries_query().to_params();
        assert_eq!(params[0], ("select".to_string(), "id,name".to_string()));
        assert_eq!(params[1], ("order".to_string(), "name.asc".to_string()));
    }

    #[test]
    fn test_load_countries() {
        let backend = StaticBackend(Some(vec![
            serde_json::json!({"id": 1, "name": "Canada"}),
            serde_json::json!({"id": 2, "name": "Japan"}),
        ]));
        let mut panel = FilterPanelView::new(Arc::new(backend));

        let names: Vec<String> = tokio_test::block_on(panel.load())
            .iter()
            .map(|c| c.name.clone())
            .collect();

        assert_eq!(names, vec!["Canada", "Japan"]);
        assert_eq!(panel.countries().len(), 2);
    }

    #[test]
    fn test_load_failure_leaves_list_empty() {
        let mut panel = FilterPanelView::new(Arc::new(StaticBackend(None)));

        assert!(tokio_test::block_on(panel.load()).is_empty());
    }

    #[test]
    fn test_job_type_options_reflect_selection() {
        let filter = FilterState::new("", [JobType::PartTime]);

        let options = FilterPanelView::job_type_options(&filter);

        assert_eq!(
            options.iter().map(|o| o.label).collect::<Vec<_>>(),
            vec!["Full Time", "Part Time", "Contract"]
        );
        assert_eq!(
            options.iter().map(|o| o.checked).collect::<Vec<_>>(),
            vec![false, true, false]
        );
    }
}
