//! Error types shared by the sampler and the I/O layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SamplerError>;

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("PDB parse error on line {line}: {message}")]
    PdbParse { line: usize, message: String },
}

impl SamplerError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        SamplerError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
