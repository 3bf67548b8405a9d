//! Errors and the per-thread last-error slot.
//!
//! Every fallible operation in this crate returns a [`Result`]. In addition,
//! public operations record the [`ErrorCode`] of their most recent failure in a
//! thread-local slot that can be inspected with [`last_error`]. The slot is a
//! diagnostic convenience only: it is last-writer-wins and is never read by the
//! crate itself.
use std::cell::Cell;
use std::collections::TryReserveError;
use std::fmt::Display;

use crate::parser::ParseError;
use crate::value::Kind;

/// Errors produced when building, inspecting or parsing values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to allocate memory")]
    OutOfMemory,
    #[error("index {index} out of bound for list of length {len}")]
    IndexOutOfBound { index: usize, len: usize },
    #[error("is not a list: found {0}")]
    NotAList(Kind),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The diagnostic code for this error, if it has one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::OutOfMemory => Some(ErrorCode::OutOfMemory),
            Error::IndexOutOfBound { .. } => Some(ErrorCode::IndexOutOfBound),
            Error::NotAList(_) => Some(ErrorCode::NotAList),
            Error::Parse(ParseError::Eof(_)) => Some(ErrorCode::UnexpectedEof),
            Error::Parse(_) | Error::Io(_) => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

/// Shorthand for a result specialised to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Closed set of diagnostic codes stored in the last-error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    #[default]
    Ok,
    OutOfMemory,
    IndexOutOfBound,
    NotAList,
    UnexpectedEof,
}

impl ErrorCode {
    /// Human readable description of the code.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::Ok => "ok",
            ErrorCode::OutOfMemory => "failed to allocate memory",
            ErrorCode::IndexOutOfBound => "index out of bound",
            ErrorCode::NotAList => "is not a list",
            ErrorCode::UnexpectedEof => "unexpected end of input",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Human readable description of an error code.
#[inline]
pub fn error_description(code: ErrorCode) -> &'static str {
    code.description()
}

thread_local! {
    static LAST_ERROR: Cell<ErrorCode> = const { Cell::new(ErrorCode::Ok) };
}

/// The code of the most recent failure on this thread.
pub fn last_error() -> ErrorCode {
    LAST_ERROR.with(Cell::get)
}

/// Reset the last-error slot of this thread to [`ErrorCode::Ok`].
pub fn clear_last_error() {
    LAST_ERROR.with(|slot| slot.set(ErrorCode::Ok));
}

/// Record the code of a failed result in the last-error slot and pass it through.
pub(crate) fn track<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        if let Some(code) = err.code() {
            LAST_ERROR.with(|slot| slot.set(code));
        }
    }
    result
}
