//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },
}

impl ApplicationError {
    pub(crate) fn invalid_command(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
