use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    InvalidInput,
    InvalidData,
    Io,
}

/// Application error carrying a stable machine-readable code and a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self {
            kind: ErrorKind::InvalidData,
            message: message.into(),
        }
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self {
            kind: ErrorKind::Io,
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::InvalidData => "invalid_data",
            ErrorKind::Io => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message)
    }
}

impl std::error::Error for AppError {}
