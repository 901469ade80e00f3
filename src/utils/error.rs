use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobBoardError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Query rejected by backend (status {status}): {message}")]
    QueryError {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, JobBoardError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Query,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl JobBoardError {
    /// 查詢錯誤：網路、後端拒絕或回應格式不符
    pub fn is_query_error(&self) -> bool {
        self.category() == ErrorCategory::Query
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            JobBoardError::ApiError(_)
            | JobBoardError::QueryError { .. }
            | JobBoardError::SerializationError(_) => ErrorCategory::Query,
            JobBoardError::ConfigValidationError { .. }
            | JobBoardError::InvalidConfigValueError { .. }
            | JobBoardError::MissingConfigError { .. } => ErrorCategory::Configuration,
            JobBoardError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            JobBoardError::ApiError(_) => ErrorSeverity::Medium,
            JobBoardError::QueryError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            JobBoardError::QueryError { .. } | JobBoardError::SerializationError(_) => {
                ErrorSeverity::High
            }
            JobBoardError::ConfigValidationError { .. }
            | JobBoardError::InvalidConfigValueError { .. }
            | JobBoardError::MissingConfigError { .. } => ErrorSeverity::High,
            JobBoardError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            JobBoardError::ApiError(e) if e.is_timeout() => {
                "The job backend did not answer in time".to_string()
            }
            JobBoardError::ApiError(_) => "Could not reach the job backend".to_string(),
            JobBoardError::QueryError { message, .. } => {
                format!("The job backend rejected the query: {}", message)
            }
            JobBoardError::SerializationError(_) => {
                "The job backend returned data in an unexpected shape".to_string()
            }
            JobBoardError::IoError(e) => format!("File system error: {}", e),
            JobBoardError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            JobBoardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            JobBoardError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            JobBoardError::ApiError(_) => {
                "Check the backend URL and your network connection, then retry".to_string()
            }
            JobBoardError::QueryError { hint: Some(hint), .. } => hint.clone(),
            JobBoardError::QueryError { status: 401 | 403, .. } => {
                "Check that the API key is valid for this project".to_string()
            }
            JobBoardError::QueryError { .. } => {
                "Check the search text syntax and that the jobs schema is deployed".to_string()
            }
            JobBoardError::SerializationError(_) => {
                "Make sure the backend schema matches the expected jobs/companies columns"
                    .to_string()
            }
            JobBoardError::IoError(_) => "Check file paths and permissions".to_string(),
            JobBoardError::ConfigValidationError { .. }
            | JobBoardError::InvalidConfigValueError { .. }
            | JobBoardError::MissingConfigError { .. } => {
                "Fix the configuration file or command line flags and try again".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_error(status: u16, hint: Option<&str>) -> JobBoardError {
        JobBoardError::QueryError {
            status,
            code: Some("42P01".to_string()),
            message: "relation \"jobs\" does not exist".to_string(),
            details: None,
            hint: hint.map(str::to_string),
        }
    }

    #[test]
    fn test_query_errors_are_classified_as_query() {
        assert!(query_error(400, None).is_query_error());
        let serde_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(JobBoardError::SerializationError(serde_err).is_query_error());

        let config_err = JobBoardError::MissingConfigError {
            field: "backend.url".to_string(),
        };
        assert!(!config_err.is_query_error());
        assert_eq!(config_err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_server_side_failures_are_retryable_severity() {
        assert_eq!(query_error(503, None).severity(), ErrorSeverity::Medium);
        assert_eq!(query_error(400, None).severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_recovery_prefers_backend_hint() {
        assert_eq!(
            query_error(404, Some("Perhaps you meant the table public.job")).recovery_suggestion(),
            "Perhaps you meant the table public.job"
        );
        assert!(query_error(401, None).recovery_suggestion().contains("API key"));
    }
}
