use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid OSCAL token: {0:?}")]
    InvalidToken(String),
    #[error("invalid rule status: {0:?}")]
    InvalidStatus(String),
    #[error("rule {0} not found")]
    RuleNotFound(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
