use thiserror::Error;

/// Message carried by the [`ErrorKind::OutOfRange`] error that signals a read
/// starting at or past the end of a stream.
pub const EOF_MESSAGE: &str = "EOF";

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn out_of_range(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::OutOfRange {
                message: message.into(),
            }
            .into(),
        )
    }

    /// The end-of-stream error: the requested start position is at or beyond
    /// the logical size.
    pub fn eof() -> Error {
        Error::out_of_range(EOF_MESSAGE)
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn allocation_failure(requested: usize) -> Error {
        Error(ErrorKind::AllocationFailure { requested }.into())
    }

    pub fn is_invalid_arg(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { .. })
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { message } if message == EOF_MESSAGE)
    }

    pub fn is_io(&self) -> bool {
        matches!(self.kind(), ErrorKind::Io { .. })
    }

    /// Short description of the failure, without the kind prefix.
    pub fn message(&self) -> String {
        match self.kind() {
            ErrorKind::InvalidArgument { message, .. } => message.clone(),
            ErrorKind::OutOfRange { message } => message.clone(),
            ErrorKind::Io { source, .. } => source.to_string(),
            ErrorKind::AllocationFailure { .. } => self.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("out of range: {message}")]
    OutOfRange { message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("failed to allocate {requested} bytes")]
    AllocationFailure { requested: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        use std::io::ErrorKind as IoKind;

        match e.into_kind() {
            ErrorKind::Io { source, .. } => source,
            kind @ ErrorKind::InvalidArgument { .. } => {
                std::io::Error::new(IoKind::InvalidInput, kind.to_string())
            }
            kind @ ErrorKind::OutOfRange { .. } => {
                std::io::Error::new(IoKind::UnexpectedEof, kind.to_string())
            }
            kind @ ErrorKind::AllocationFailure { .. } => {
                std::io::Error::new(IoKind::OutOfMemory, kind.to_string())
            }
        }
    }
}
