use std::fmt;
use thiserror::Error;

/// The error type for tablesign operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation is not supported by the current state, such as
    /// requesting a signature without a shared key.
    InvalidOperation,

    /// Two sources supplied different values for the same argument
    ArgumentConflict,

    /// A required argument is missing or empty
    ArgumentAbsent,

    /// An argument is present but malformed
    ArgumentInvalid,

    /// Credentials exist but are invalid/malformed
    CredentialInvalid,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid operation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidOperation, message)
    }

    /// Create an argument conflict error
    pub fn argument_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArgumentConflict, message)
    }

    /// Create an argument absent error
    pub fn argument_absent(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArgumentAbsent, message)
    }

    /// Create an argument invalid error
    pub fn argument_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArgumentInvalid, message)
    }

    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidOperation => write!(f, "invalid operation"),
            ErrorKind::ArgumentConflict => write!(f, "conflicting arguments"),
            ErrorKind::ArgumentAbsent => write!(f, "missing argument"),
            ErrorKind::ArgumentInvalid => write!(f, "invalid argument"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::argument_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::argument_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
