pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::PostgrestBackend;
pub use config::toml_config::TomlConfig;
pub use crate::core::{
    filter_panel::FilterPanelView,
    job_list::{JobListView, LoadState},
    job_query::JobQueryService,
};
pub use domain::model::{Company, Country, FilterState, Job, JobType, RecordId};
pub use domain::query::{SelectQuery, TextSearchType};
pub use utils::error::{JobBoardError, Result};
