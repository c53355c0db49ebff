use slidebar_model::ModelError;
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur at the compiler boundary.
///
/// Block-level problems never surface here: unknown kinds and malformed
/// settings are skipped or defaulted so one bad block cannot take down the
/// whole bar.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Slide {index} out of range (campaign has {count} slides)")]
    SlideOutOfRange { index: usize, count: usize },
}
