//! Configuration errors
//!
//! The only fallible operations are the ones that build or rebuild a
//! simulation. A constructed simulation ticks without errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    #[error("initial boid count {got} does not match configured count {expected}")]
    CountMismatch { expected: usize, got: usize },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
