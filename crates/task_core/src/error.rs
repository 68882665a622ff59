use std::io;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("format_error - {0}")]
    Format(String),
    #[error("not_found - {0}")]
    NotFound(String),
    #[error("io_error - {message}")]
    Io { kind: io::ErrorKind, message: String },
    #[error("invalid_input - {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn format<M: Into<String>>(message: M) -> Self {
        Self::Format(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn io<M: Into<String>>(kind: io::ErrorKind, message: M) -> Self {
        Self::Io {
            kind,
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Format(_) => "format_error",
            Self::NotFound(_) => "not_found",
            Self::Io { .. } => "io_error",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Format(message) => message,
            Self::NotFound(message) => message,
            Self::Io { message, .. } => message,
            Self::InvalidInput(message) => message,
        }
    }

    /// True when the error came from opening a file that does not exist.
    pub fn is_not_found_io(&self) -> bool {
        matches!(
            self,
            Self::Io {
                kind: io::ErrorKind::NotFound,
                ..
            }
        )
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::io(err.kind(), err.to_string())
    }
}
