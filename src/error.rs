use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentinelError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
