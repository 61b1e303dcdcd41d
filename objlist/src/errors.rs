use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for record list operations
///
/// Each kind names one category of failure so callers can match on the
/// category instead of parsing messages.
///
/// # Examples
///
/// ```rust
/// use objlist::errors::{ErrorKind, ObjListError, ObjListResult};
///
/// fn example() -> ObjListResult<()> {
///     Err(ObjListError::new("no record at position", ErrorKind::OutOfRange))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::OutOfRange);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// No record matches the given predicate
    NotFound,
    /// A position-based mutation resolved to a position outside the collection
    OutOfRange,
    /// A predicate or sort specification has an unusable shape
    MalformedSpecification,
    /// A record carries no identity field and no explicit target was given
    NotIdentifiable,
    /// A field name is empty or otherwise unusable
    InvalidFieldName,
    /// An embedded field path could not be followed
    ValidationError,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::OutOfRange => write!(f, "Out of range"),
            ErrorKind::MalformedSpecification => write!(f, "Malformed specification"),
            ErrorKind::NotIdentifiable => write!(f, "Not identifiable"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type for every fallible operation of this crate.
///
/// Carries a message, an [ErrorKind], an optional cause and the backtrace
/// captured where the error was created.
///
/// # Examples
///
/// ```rust
/// use objlist::errors::{ErrorKind, ObjListError};
///
/// let cause = ObjListError::new("position 7 not in collection", ErrorKind::OutOfRange);
/// let err = ObjListError::new_with_cause("replace failed", ErrorKind::OutOfRange, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct ObjListError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<ObjListError>>,
    backtrace: Atomic<Backtrace>,
}

impl ObjListError {
    /// Creates a new `ObjListError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        ObjListError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `ObjListError` chained to the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: ObjListError) -> Self {
        ObjListError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&ObjListError> {
        self.cause.as_deref()
    }
}

impl Display for ObjListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for ObjListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for ObjListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for record list operations.
pub type ObjListResult<T> = Result<T, ObjListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_error_without_cause() {
        let error = ObjListError::new("nothing at position 4", ErrorKind::OutOfRange);
        assert_eq!(error.message(), "nothing at position 4");
        assert_eq!(error.kind(), &ErrorKind::OutOfRange);
        assert!(error.cause().is_none());
        assert!(error.source().is_none());
    }

    #[test]
    fn new_with_cause_chains_source() {
        let cause = ObjListError::new("record has no id", ErrorKind::NotIdentifiable);
        let error = ObjListError::new_with_cause(
            "cannot replace record",
            ErrorKind::MalformedSpecification,
            cause,
        );
        assert_eq!(error.kind(), &ErrorKind::MalformedSpecification);
        assert_eq!(error.cause().unwrap().kind(), &ErrorKind::NotIdentifiable);
        assert_eq!(error.source().unwrap().to_string(), "record has no id");
    }

    #[test]
    fn display_shows_message_only() {
        let error = ObjListError::new("empty field name", ErrorKind::InvalidFieldName);
        assert_eq!(format!("{}", error), "empty field name");
    }

    #[test]
    fn debug_includes_cause() {
        let cause = ObjListError::new("inner", ErrorKind::NotFound);
        let error = ObjListError::new_with_cause("outer", ErrorKind::OutOfRange, cause);
        let debug = format!("{:?}", error);
        assert!(debug.starts_with("outer"));
        assert!(debug.contains("Caused by: inner"));
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "Not found");
        assert_eq!(ErrorKind::OutOfRange.to_string(), "Out of range");
        assert_eq!(
            ErrorKind::MalformedSpecification.to_string(),
            "Malformed specification"
        );
        assert_eq!(ErrorKind::NotIdentifiable.to_string(), "Not identifiable");
    }

    #[test]
    fn clone_preserves_kind_and_message() {
        let error = ObjListError::new("boom", ErrorKind::InternalError);
        let cloned = error.clone();
        assert_eq!(cloned.message(), error.message());
        assert_eq!(cloned.kind(), error.kind());
    }
}
