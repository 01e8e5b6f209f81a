use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevalueError {
    #[error("Cannot stringify arbitrary non-POJOs (found at {path})")]
    Unserializable { path: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid input")]
    InvalidInput,
    #[error("Invalid index {0}")]
    InvalidIndex(i64),
    #[error("Unknown type {0}")]
    UnknownType(String),
    #[error("Invalid date {0:?}")]
    InvalidDate(String),
    #[error("Value nests deeper than {0} levels")]
    TooDeep(usize),
    #[error("Invalid bigint {0:?}")]
    InvalidBigInt(String),
    /// Raised by caller-supplied revivers.
    #[error("{0}")]
    Custom(String),
}

impl DevalueError {
    pub fn custom(message: impl Into<String>) -> Self {
        DevalueError::Custom(message.into())
    }
}
