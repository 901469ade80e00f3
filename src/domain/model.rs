use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Primary key as returned by the backend. Tables may use integer or uuid keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::FullTime, JobType::PartTime, JobType::Contract];

    /// Key used in the database and in query parameters.
    pub fn key(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full Time",
            JobType::PartTime => "Part Time",
            JobType::Contract => "Contract",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.key() == s.trim())
            .ok_or_else(|| format!("unknown job type '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    /// Full-text index column. Opaque to this crate.
    #[serde(rename = "fts", default, skip_serializing_if = "Option::is_none")]
    pub search_document: Option<serde_json::Value>,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: RecordId,
    pub name: String,
}

/// Search text and selected job types, derived from the current query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub selected_types: BTreeSet<JobType>,
}

impl FilterState {
    pub const SEARCH_PARAM: &'static str = "q";
    pub const TYPES_PARAM: &'static str = "types";

    pub fn new(search_text: impl Into<String>, selected_types: impl IntoIterator<Item = JobType>) -> Self {
        Self {
            search_text: search_text.into(),
            selected_types: selected_types.into_iter().collect(),
        }
    }

    /// Builds the state from decoded query parameters.
    ///
    /// `types` may be repeated or comma separated. Unknown type keys are dropped
    /// so the selection always stays within [`JobType::ALL`]. The last `q` wins.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = FilterState::default();

        for (key, value) in pairs {
            match key.as_ref() {
                Self::SEARCH_PARAM => state.search_text = value.as_ref().to_string(),
                Self::TYPES_PARAM => {
                    for raw in value.as_ref().split(',').filter(|s| !s.trim().is_empty()) {
                        match raw.parse::<JobType>() {
                            Ok(job_type) => {
                                state.selected_types.insert(job_type);
                            }
                            Err(e) => tracing::debug!("Ignoring filter value: {}", e),
                        }
                    }
                }
                _ => {}
            }
        }

        state
    }

    /// Parses a raw `application/x-www-form-urlencoded` query, with or without a leading `?`.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_query_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    pub fn has_search(&self) -> bool {
        !self.search_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_deserializes_from_backend_row() {
        let row = serde_json::json!({
            "id": 7,
            "title": "Backend Engineer",
            "description": "Rust services",
            "type": "part_time",
            "fts": "'backend':1 'engin':2",
            "company": {"id": "c0ffee", "name": "Acme"}
        });

        let job: Job = serde_json::from_value(row).unwrap();

        assert_eq!(job.id, RecordId::Int(7));
        assert_eq!(job.job_type, JobType::PartTime);
        assert_eq!(job.company.id, RecordId::Text("c0ffee".to_string()));
        assert!(job.search_document.is_some());
    }

    #[test]
    fn test_job_type_parse() {
        assert_eq!("contract".parse::<JobType>().unwrap(), JobType::Contract);
        assert_eq!(" full_time ".parse::<JobType>().unwrap(), JobType::FullTime);
        assert!("freelance".parse::<JobType>().is_err());
        assert!("Full Time".parse::<JobType>().is_err());
    }

    #[test]
    fn test_filter_state_from_query_string() {
        let state = FilterState::from_query_string("?q=rust+engineer&types=full_time,contract");

        assert_eq!(state.search_text, "rust engineer");
        assert_eq!(
            state.selected_types,
            BTreeSet::from([JobType::FullTime, JobType::Contract])
        );
    }

    #[test]
    fn test_filter_state_repeated_types_and_unknown_values() {
        let state = FilterState::from_query_string("types=part_time&types=internship&types=contract");

        assert!(!state.has_search());
        assert_eq!(
            state.selected_types,
            BTreeSet::from([JobType::PartTime, JobType::Contract])
        );
    }

    #[test]
    fn test_filter_state_empty_query() {
        assert_eq!(FilterState::from_query_string(""), FilterState::default());
        assert_eq!(FilterState::from_query_string("?"), FilterState::default());
    }
}
