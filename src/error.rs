// src/error.rs

use thiserror::Error;

/// Errors raised by the gasket library.
///
/// Generation itself is total over valid input; the only failure is a
/// caller handing in something outside the accepted domain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GasketError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GasketError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GasketError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GasketError>;
