use crate::errors::LeftoversError;

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid filter regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl LeftoversError for FilterError {
    fn error_code(&self) -> &'static str {
        match self {
            FilterError::InvalidRegex { .. } => "FILTER_INVALID_REGEX",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
