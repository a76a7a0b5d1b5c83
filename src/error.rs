//! Crate-level error type.

use thiserror::Error;

use crate::attachment::AttachmentError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error("logging: {0}")]
    Logging(String),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
