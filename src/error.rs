pub type MuralResult<T> = Result<T, MuralError>;

#[derive(thiserror::Error, Debug)]
pub enum MuralError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MuralError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}
