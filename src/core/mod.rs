pub mod client_filter;
pub mod filter_panel;
pub mod job_list;
pub mod job_query;
pub mod render;

pub use crate::domain::model::{Company, Country, FilterState, Job, JobType};
pub use crate::domain::ports::{ConfigProvider, QueryBackend};
pub use crate::utils::error::Result;
