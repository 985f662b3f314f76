//! Error types for the treefs namespace.

use thiserror::Error;

/// Content buffer errors.
///
/// A failed buffer operation never mutates the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("invalid position {pos} (length {len})")]
    InvalidPosition { pos: usize, len: usize },

    #[error("empty text")]
    EmptyText,

    #[error("substring not found: {0:?}")]
    NotFound(String),
}

/// Namespace errors reported by the filesystem facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{0}: no such file or directory")]
    NotFound(String),

    #[error("{0}: not a directory")]
    NotADirectory(String),

    #[error("{0}: is a directory")]
    IsADirectory(String),

    #[error("{0}: already exists")]
    AlreadyExists(String),

    #[error("{0}: permission denied")]
    PermissionDenied(String),

    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    #[error("cannot remove the root directory")]
    RootRemoval,

    #[error("{0}: is a directory (use -r)")]
    DirectoryNotEmpty(String),

    #[error("invalid mode: {0} (expected three octal digits, e.g. 755)")]
    InvalidMode(String),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Shell command errors. Rendered as `<command>: <error>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("syntax error: expected a file name after '{0}'")]
    MissingRedirectTarget(String),

    #[error("missing operand")]
    MissingOperand,

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid position: {0:?}")]
    InvalidNumber(String),

    #[error("command not found")]
    UnknownCommand,

    #[error(transparent)]
    Fs(#[from] FsError),
}

impl From<BufferError> for ShellError {
    fn from(err: BufferError) -> Self {
        ShellError::Fs(FsError::Buffer(err))
    }
}

/// Application-level errors (configuration, logging, binary I/O).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fs(#[from] FsError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
