use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid campaign JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {kind} setting on block '{block_id}': {message}")]
    InvalidSetting {
        block_id: String,
        kind: String,
        message: String,
    },
}
