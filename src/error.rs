//! Error types for the farmquest library.

use thiserror::Error;

/// Precondition violations when constructing a progression session.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a {kind} session needs at least one step")]
    EmptySteps { kind: &'static str },
}

/// Errors emitted while reading the embedded content catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog file {0} is not embedded")]
    MissingFile(String),
    #[error("catalog file {0} is not valid UTF-8")]
    NotUtf8(String),
    #[error("unknown course {0:?}")]
    UnknownCourse(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
}
