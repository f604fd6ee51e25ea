use thiserror::Error;
use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Upstream payload failed validation at the boundary
    #[error("Reference text error: {0}")]
    Reference(String),

    #[error("Report error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn reference<S: Into<String>>(msg: S) -> Self {
        Error::Reference(msg.into())
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadPool(format!("Thread pool build failed: {}", err))
    }
}
