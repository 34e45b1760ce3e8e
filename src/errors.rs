#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellErrorType {
    NotFound,
    IsDirectory,
    NotDirectory,
    NotEmpty,
    AlreadyExists,
    InvalidArgument,
    Busy,
    InvalidCommand,
    IOError,
}

/// A recoverable failure. The message is the exact line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ShellError {
    pub error_type: ShellErrorType,
    pub message: String,
}

impl ShellError {
    pub fn new(error_type: ShellErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(error: std::io::Error) -> Self {
        Self {
            error_type: ShellErrorType::IOError,
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShellError>;
