use thiserror::Error;

/// Errors returned by tree operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// No live node carries the requested key.
    #[error("key not found in tree")]
    NotFound,
    /// A live node already carries an equal key.
    #[error("key already present in tree")]
    DuplicateKey,
}
