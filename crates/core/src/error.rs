use thiserror::Error;

pub type AdpilotResult<T> = Result<T, AdpilotError>;

#[derive(Error, Debug)]
pub enum AdpilotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream ads platform error: {0}")]
    Upstream(String),

    #[error("Identity store error: {0}")]
    IdentityStore(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
