//! Error taxonomy for key-management operations

use crate::errno::Errno;
use key_types::KeySerial;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The closed set of kernel error codes this layer knows by name.
///
/// This enum single-sources the known-errno set: the mapper looks members up
/// by errno and the host bridge registers them by [`name`](Self::name), so
/// the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCondition {
    /// EACCES: access denied by key permissions
    AccessDenied,
    /// EPERM: operation not permitted
    NotPermitted,
    /// EINVAL: invalid argument
    InvalidArgument,
    /// EKEYEXPIRED: key has expired
    KeyExpired,
    /// EKEYREJECTED: key was rejected by its type
    KeyRejected,
    /// EKEYREVOKED: key has been revoked
    KeyRevoked,
    /// EOPNOTSUPP: operation not supported by this key type
    NotSupported,
    /// ENOKEY: no matching key found
    KeyNotFound,
    /// ENOMEM: kernel allocation failure
    OutOfMemory,
    /// EDQUOT: key quota exceeded
    QuotaExceeded,
    /// EINTR: call interrupted by a signal
    Interrupted,
    /// ENOTDIR: target is not a keyring
    NotADirectory,
}

impl ErrorCondition {
    /// Every known condition, in registration order.
    pub const ALL: [ErrorCondition; 12] = [
        ErrorCondition::AccessDenied,
        ErrorCondition::NotPermitted,
        ErrorCondition::InvalidArgument,
        ErrorCondition::KeyExpired,
        ErrorCondition::KeyRejected,
        ErrorCondition::KeyRevoked,
        ErrorCondition::NotSupported,
        ErrorCondition::KeyNotFound,
        ErrorCondition::OutOfMemory,
        ErrorCondition::QuotaExceeded,
        ErrorCondition::Interrupted,
        ErrorCondition::NotADirectory,
    ];

    /// The errno value this condition is bound to
    pub fn errno(self) -> i32 {
        match self {
            ErrorCondition::AccessDenied => libc::EACCES,
            ErrorCondition::NotPermitted => libc::EPERM,
            ErrorCondition::InvalidArgument => libc::EINVAL,
            ErrorCondition::KeyExpired => libc::EKEYEXPIRED,
            ErrorCondition::KeyRejected => libc::EKEYREJECTED,
            ErrorCondition::KeyRevoked => libc::EKEYREVOKED,
            ErrorCondition::NotSupported => libc::EOPNOTSUPP,
            ErrorCondition::KeyNotFound => libc::ENOKEY,
            ErrorCondition::OutOfMemory => libc::ENOMEM,
            ErrorCondition::QuotaExceeded => libc::EDQUOT,
            ErrorCondition::Interrupted => libc::EINTR,
            ErrorCondition::NotADirectory => libc::ENOTDIR,
        }
    }

    /// Looks an errno up in the known set
    pub fn from_errno(errno: Errno) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.errno() == errno.raw())
    }

    /// The name this condition is registered under in the host namespace
    pub fn name(self) -> &'static str {
        match self {
            ErrorCondition::AccessDenied => "access-denied",
            ErrorCondition::NotPermitted => "permission-denied",
            ErrorCondition::InvalidArgument => "invalid-argument",
            ErrorCondition::KeyExpired => "key-expired",
            ErrorCondition::KeyRejected => "key-rejected",
            ErrorCondition::KeyRevoked => "key-revoked",
            ErrorCondition::NotSupported => "operation-not-supported",
            ErrorCondition::KeyNotFound => "key-not-found",
            ErrorCondition::OutOfMemory => "out-of-memory",
            ErrorCondition::QuotaExceeded => "quota-exceeded",
            ErrorCondition::Interrupted => "interrupted",
            ErrorCondition::NotADirectory => "not-a-directory",
        }
    }

    /// The OS description text this condition is registered with
    pub fn os_description(self) -> String {
        Errno(self.errno()).description()
    }
}

impl fmt::Display for ErrorCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors surfaced by key-management operations.
///
/// A known errno becomes [`Kernel`](Self::Kernel) with its named condition,
/// so callers can pattern-match a specific failure (say, a revoked key). An
/// errno outside the known set becomes [`Os`](Self::Os) carrying the OS
/// description. Malformed kernel replies get their own variants; no errno
/// applies to those.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// A kernel error in the known set, with the failing call's tag
    #[error("{condition}: {context}")]
    Kernel {
        condition: ErrorCondition,
        context: String,
    },

    /// A kernel error outside the known set
    #[error("{message}")]
    Os { errno: i32, message: String },

    /// Describe reply did not yield the four leading fields
    #[error("unparseable description obtained for key {key}")]
    MalformedDescription { key: KeySerial },

    /// List target's type field is not "keyring"
    #[error("key {key} is not a keyring")]
    NotAKeyring { key: KeySerial },

    /// Member-list byte length is not a multiple of the serial width
    #[error("keyring {key} member list length {length} is not a multiple of {width}")]
    MalformedKeyList {
        key: KeySerial,
        length: usize,
        width: usize,
    },
}

impl KeyError {
    /// Maps a captured errno to a typed error.
    ///
    /// The mapping is computed from the errno value handed in at failure
    /// time; nothing is cached. `context` is the literal tag naming the
    /// failing kernel call and is carried as the error payload, or joined
    /// onto the OS description for errnos outside the known set.
    pub fn from_errno(errno: Errno, context: &str) -> Self {
        match ErrorCondition::from_errno(errno) {
            Some(condition) => KeyError::Kernel {
                condition,
                context: context.to_string(),
            },
            None => KeyError::Os {
                errno: errno.raw(),
                message: format!("{}: {}", errno.description(), context),
            },
        }
    }

    /// Returns the named condition for known-kernel errors
    pub fn condition(&self) -> Option<ErrorCondition> {
        match self {
            KeyError::Kernel { condition, .. } => Some(*condition),
            _ => None,
        }
    }
}
