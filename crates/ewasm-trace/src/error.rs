use thiserror::Error;

use crate::Builtin;

/// Malformed builtin invocation in the instruction stream.
///
/// These indicate a bug upstream of the interpreter; the run cannot produce a meaningful
/// trace and should be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuiltinError {
    /// The name does not denote any builtin.
    #[error("unknown builtin: {0}")]
    Unknown(String),
    /// The builtin was given the wrong number of arguments.
    #[error("builtin {builtin} expects {expected} arguments, got {actual}")]
    ArityMismatch {
        /// Invoked builtin.
        builtin: Builtin,
        /// Arity of the builtin.
        expected: usize,
        /// Number of supplied arguments.
        actual: usize,
    },
}

/// Abnormal termination raised by a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Trap {
    /// `unreachable` was executed.
    #[error("unreachable executed")]
    Unreachable,
    /// Integer division or remainder by zero.
    #[error("integer division by zero")]
    DivisionByZero,
    /// A copy read past the end of its source buffer.
    #[error("copy source out of bounds")]
    CopyOutOfBounds,
    /// A log was requested with more than four topics.
    #[error("too many log topics")]
    TooManyTopics,
}
