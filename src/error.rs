//! Error types shared across the crate.
//!
//! Mutations either fully apply and persist, or fail with `Validation` /
//! `NotFound` leaving all state untouched. `Persistence` is the one
//! exception: the in-memory change has already been applied when the
//! storage write fails, and is not rolled back.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The task text was empty or whitespace-only after trimming.
    #[error("task text cannot be empty")]
    Validation,

    /// No task with the given id exists in the repository.
    #[error("no task with id {0}")]
    NotFound(u64),

    /// Writing to or reading from the backing store failed.
    #[error("storage error: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Persistence(e.to_string())
    }
}
