use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of the parallel reduction.
#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("worker(s) {workers:?} panicked: {message}")]
    WorkerFailure { workers: Vec<usize>, message: String },

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

impl ReduceError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("pop from an empty stack")]
    Empty,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
