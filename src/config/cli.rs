use crate::core::{ConfigProvider, FilterState, JobType};
use crate::domain::query::TextSearchType;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "job-board")]
#[command(about = "Search and filter job listings from a hosted jobs database")]
pub struct CliConfig {
    /// Base URL of the hosted project, e.g. https://abc.supabase.co
    #[arg(long, env = "JOB_BOARD_URL", default_value = "http://localhost:54321")]
    pub backend_url: String,

    #[arg(long, env = "JOB_BOARD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Database schema to query (sent as Accept-Profile)
    #[arg(long)]
    pub schema: Option<String>,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    /// Raw query string as it appears in the page URL, e.g. "q=rust&types=contract"
    #[arg(long)]
    pub query: Option<String>,

    /// Full-text search text (overrides `q` from --query)
    #[arg(long)]
    pub q: Option<String>,

    /// Job types to show (overrides `types` from --query)
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<JobType>,

    #[arg(long, default_value = "raw")]
    pub search_type: TextSearchType,

    /// Text search configuration, e.g. english
    #[arg(long)]
    pub search_config: Option<String>,

    /// Also print the filter panel (job types and countries)
    #[arg(long)]
    pub show_filters: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Read query strings from stdin, one per line, and re-render after each
    #[arg(long)]
    pub interactive: bool,

    /// TOML file with backend and search settings
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Filter state from `--query`, with `--q` and `--types` taking precedence.
    pub fn filter_state(&self) -> FilterState {
        let mut state = self
            .query
            .as_deref()
            .map(FilterState::from_query_string)
            .unwrap_or_default();

        if let Some(q) = &self.q {
            state.search_text = q.clone();
        }
        if !self.types.is_empty() {
            state.selected_types = self.types.iter().copied().collect();
        }

        state
    }
}

impl ConfigProvider for CliConfig {
    fn backend_url(&self) -> &str {
        &self.backend_url
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn text_search_type(&self) -> TextSearchType {
        self.search_type
    }

    fn text_search_config(&self) -> Option<&str> {
        self.search_config.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("backend_url", &self.backend_url)?;
        let api_key = validation::validate_required_field("api_key", &self.api_key)?;
        validation::validate_non_empty_string("api_key", api_key)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["job-board", "--api-key", "anon-key"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!(config.search_type, TextSearchType::Raw);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.filter_state(), FilterState::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_filter_state_from_query_with_overrides() {
        let config = parse(&["--query", "q=designer&types=part_time", "--types", "contract,full_time"]);

        let state = config.filter_state();

        assert_eq!(state.search_text, "designer");
        assert_eq!(
            state.selected_types,
            BTreeSet::from([JobType::Contract, JobType::FullTime])
        );

        let config = parse(&["--query", "q=designer", "--q", "engineer"]);
        assert_eq!(config.filter_state().search_text, "engineer");
    }

    #[test]
    fn test_rejects_unknown_type_flag() {
        let result = CliConfig::try_parse_from(["job-board", "--types", "internship"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_requires_api_key() {
        let config = CliConfig::try_parse_from(["job-board", "--backend-url", "https://abc.supabase.co"]).unwrap();
        if std::env::var("JOB_BOARD_API_KEY").is_err() {
            assert!(config.validate().is_err());
        }

        let config = parse(&["--backend-url", "not a url"]);
        assert!(config.validate().is_err());
    }
}
