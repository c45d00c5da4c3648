//! Bridge-boundary errors

use keyctl_api::KeyError;
use thiserror::Error;

/// Errors raised at the host boundary.
///
/// Argument conversion failures are produced here, before any kernel call;
/// kernel and reply-format failures pass through from [`KeyError`]
/// untouched, never re-wrapped or re-described.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// No operation registered under this name
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Argument count outside the operation's declared arity
    #[error("{operation} expects between {min} and {max} arguments, got {got}")]
    Arity {
        operation: &'static str,
        min: usize,
        max: usize,
        got: usize,
    },

    /// An argument failed conversion to the declared type
    #[error("{operation}: argument {index} must be {expected}")]
    BadArgument {
        operation: &'static str,
        index: usize,
        expected: &'static str,
    },

    /// A key-management failure, propagated as-is
    #[error(transparent)]
    Key(#[from] KeyError),
}
