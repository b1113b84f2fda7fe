use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("IO/Terminal error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Render error: {0}")]
    RenderError(String),
}
