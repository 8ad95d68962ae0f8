// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Persistence failure that carries the driver error it came from.
    pub fn persistence(msg: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Persistence {
            message: msg.into(),
            source: Some(source.into()),
        }
    }

    /// Persistence failure detected by this crate rather than the driver.
    pub fn persistence_msg(msg: impl Into<String>) -> Self {
        Self::Persistence {
            message: msg.into(),
            source: None,
        }
    }
}
