//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::NestError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Nest(#[from] NestError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("malformed line {index} in rendered output: {line:?}")]
    MalformedLine { index: usize, line: String },

    #[error("expected {expected} rendered lines, found {found}")]
    LineCount { expected: usize, found: usize },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
