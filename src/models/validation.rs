use thiserror::Error;

/// Rejections raised while turning raw request input into typed values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
}

/// Browser forms send empty strings for blank inputs; treat those as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
