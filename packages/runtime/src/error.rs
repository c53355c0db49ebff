use slidebar_compiler::CompileError;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced to the embedding host.
///
/// Nothing in here is raised into the storefront page: mount failures leave
/// the page untouched and runtime problems degrade to a partial render.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Invalid engine config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Mount root {0} is not attached to the document")]
    DetachedRoot(usize),

    #[error("Campaign has no slides")]
    NoSlides,
}

/// Cart total could not be obtained; the shipping widget skips this cycle
#[derive(Error, Debug)]
pub enum CartError {
    #[error("Cart request failed: {0}")]
    Unavailable(String),

    #[error("Malformed cart response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Cart fetch disabled in {0} environment")]
    Disabled(String),
}

impl From<String> for CartError {
    fn from(s: String) -> Self {
        CartError::Unavailable(s)
    }
}
